pub mod dictionary;
pub mod extract;
pub mod jsonld;
pub mod language;
pub mod markup;
pub mod normalize;
pub mod ranking;
pub mod wiki;
