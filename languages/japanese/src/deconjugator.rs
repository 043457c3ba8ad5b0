use std::sync::LazyLock;

/// A candidate dictionary form for an inflected word
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Deconjugation {
    pub base_form: String,
    pub conjugation_type: &'static str,
}

struct Rule {
    suffix: String,
    endings: &'static [&'static str],
    conjugation_type: &'static str,
}

impl Rule {
    fn new(suffix: impl Into<String>, endings: &'static [&'static str], conjugation_type: &'static str) -> Self {
        Self {
            suffix: suffix.into(),
            endings,
            conjugation_type,
        }
    }
}

/// Godan rows as (i-stem, a-stem, dictionary ending)
const GODAN_ROWS: [(&str, &str, &[&str]); 9] = [
    ("き", "か", &["く"]),
    ("ぎ", "が", &["ぐ"]),
    ("し", "さ", &["す"]),
    ("ち", "た", &["つ"]),
    ("に", "な", &["ぬ"]),
    ("び", "ば", &["ぶ"]),
    ("み", "ま", &["む"]),
    ("り", "ら", &["る"]),
    ("い", "わ", &["う"]),
];

const POLITE: [&str; 6] = ["ます", "ました", "ません", "ませんでした", "たい", "たかった"];
const NEGATIVE: [&str; 2] = ["ない", "なかった"];

/// Godan て/た endings with the dictionary endings they can come from
const TE_TA: [(&str, &[&str]); 10] = [
    ("いて", &["く"]),
    ("いた", &["く"]),
    ("いで", &["ぐ"]),
    ("いだ", &["ぐ"]),
    ("して", &["す"]),
    ("した", &["す"]),
    ("って", &["う", "つ", "る"]),
    ("った", &["う", "つ", "る"]),
    ("んで", &["ぬ", "ぶ", "む"]),
    ("んだ", &["ぬ", "ぶ", "む"]),
];

/// Auxiliaries that attach to a て-form and are peeled before the rules run
const TE_AUXILIARIES: [&str; 6] = ["ている", "ていた", "ています", "ていました", "てる", "てた"];

static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    let mut rules = Vec::new();

    for (i_stem, a_stem, endings) in GODAN_ROWS {
        for polite in POLITE {
            rules.push(Rule::new(format!("{i_stem}{polite}"), endings, "godan verb, polite"));
        }
        for negative in NEGATIVE {
            rules.push(Rule::new(format!("{a_stem}{negative}"), endings, "godan verb, negative"));
        }
    }

    for suffix in POLITE.iter().chain(NEGATIVE.iter()) {
        rules.push(Rule::new(*suffix, &["る"], "ichidan verb"));
    }
    for suffix in ["た", "て", "られる", "させる", "よう"] {
        rules.push(Rule::new(suffix, &["る"], "ichidan verb"));
    }

    for (suffix, endings) in TE_TA {
        rules.push(Rule::new(suffix, endings, "godan verb, te/ta-form"));
    }

    for suffix in ["かった", "くない", "くなかった", "くて", "く", "さ"] {
        rules.push(Rule::new(suffix, &["い"], "i-adjective"));
    }

    for suffix in ["します", "しました", "しない", "した", "して", "させる", "される"] {
        rules.push(Rule::new(suffix, &["する"], "suru verb"));
    }
    for suffix in ["きます", "きました", "こない", "きた", "きて"] {
        rules.push(Rule::new(suffix, &["くる"], "kuru verb"));
    }

    rules
});

/// Suffix-rule deconjugator for common verb and adjective inflections.
///
/// Results are candidates, not analyses: `読んだ` yields `読ぬ`, `読ぶ` and
/// `読む`. Callers match them against something that knows real words.
#[derive(Debug, Default, Clone, Copy)]
pub struct JapaneseDeconjugator;

impl JapaneseDeconjugator {
    pub fn new() -> Self {
        Self
    }

    /// Possible base forms of `word`, without duplicates and never `word` itself
    pub fn deconjugate(&self, word: &str) -> Vec<Deconjugation> {
        let mut results = Vec::new();
        self.apply_rules(word, &mut results);

        for auxiliary in TE_AUXILIARIES {
            if let Some(stem) = word.strip_suffix(auxiliary) {
                if !stem.is_empty() {
                    self.apply_rules(&format!("{stem}て"), &mut results);
                }
            }
        }

        results.retain(|r| r.base_form != word);
        results
    }

    fn apply_rules(&self, word: &str, results: &mut Vec<Deconjugation>) {
        for rule in RULES.iter() {
            let Some(stem) = word.strip_suffix(rule.suffix.as_str()) else {
                continue;
            };
            if stem.is_empty() {
                continue;
            }
            for ending in rule.endings {
                let base_form = format!("{stem}{ending}");
                if results.iter().all(|r| r.base_form != base_form) {
                    results.push(Deconjugation {
                        base_form,
                        conjugation_type: rule.conjugation_type,
                    });
                }
            }
        }
    }

    /// Base forms only
    pub fn base_forms(&self, word: &str) -> Vec<String> {
        self.deconjugate(word).into_iter().map(|r| r.base_form).collect()
    }
}
