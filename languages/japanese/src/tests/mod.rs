
use std::path::Path;

use tango_config::Config;
use wiremock::MockServer;

use crate::http::HttpClient;

/// Config with every endpoint pointing at `server`
fn mock_config(server: &MockServer, media_dir: &Path) -> Config {
    let uri = server.uri();
    let mut config = Config::default();
    config.network.timeout_secs = 5;
    config.sources.jisho_url = format!("{uri}/jisho");
    config.sources.tatoeba_url = format!("{uri}/tatoeba");
    config.sources.wikipedia_api = format!("{uri}/wikipedia");
    config.sources.wiktionary_api = format!("{uri}/wiktionary");
    config.sources.kotobank_url = format!("{uri}/kotobank");
    config.sources.goo_url = format!("{uri}/goo");
    config.sources.commons_api = format!("{uri}/commons");
    config.media.dir = media_dir.to_path_buf();
    config
}

fn http() -> HttpClient {
    let mut network = tango_config::network::NetworkConfig::default();
    network.timeout_secs = 5;
    HttpClient::new(&network, false).unwrap()
}
