use lazy_static::lazy_static;
use rust_stemmers::{Algorithm, Stemmer};
use std::collections::HashSet;

/// Names the stop-word list and stemmer pair below. Bump it whenever either
/// changes so stores written under the old rules are refused on load.
pub const NORMALIZATION_VERSION: u32 = 1;

lazy_static! {
    static ref STEMMER: Stemmer = Stemmer::create(Algorithm::English);
    // NLTK english stopwords corpus, verbatim.
    static ref STOPWORDS: HashSet<&'static str> = {
        let words: &[&str] = &[
            "i","me","my","myself","we","our","ours","ourselves",
            "you","you're","you've","you'll","you'd","your","yours","yourself","yourselves",
            "he","him","his","himself","she","she's","her","hers","herself",
            "it","it's","its","itself","they","them","their","theirs","themselves",
            "what","which","who","whom","this","that","that'll","these","those",
            "am","is","are","was","were","be","been","being","have","has","had","having",
            "do","does","did","doing","a","an","the","and","but","if","or","because","as",
            "until","while","of","at","by","for","with","about","against","between","into",
            "through","during","before","after","above","below","to","from","up","down",
            "in","out","on","off","over","under","again","further","then","once",
            "here","there","when","where","why","how","all","any","both","each","few",
            "more","most","other","some","such","no","nor","not","only","own","same",
            "so","than","too","very","s","t","can","will","just","don","don't",
            "should","should've","now","d","ll","m","o","re","ve","y",
            "ain","aren","aren't","couldn","couldn't","didn","didn't","doesn","doesn't",
            "hadn","hadn't","hasn","hasn't","haven","haven't","isn","isn't","ma",
            "mightn","mightn't","mustn","mustn't","needn","needn't","shan","shan't",
            "shouldn","shouldn't","wasn","wasn't","weren","weren't","won","won't",
            "wouldn","wouldn't"
        ];
        words.iter().copied().collect()
    };
}

pub fn is_stopword(token: &str) -> bool { STOPWORDS.contains(token) }

fn is_alphabetic(token: &str) -> bool {
    !token.is_empty() && token.chars().all(char::is_alphabetic)
}

/// Normalize text into stems: whitespace split, lowercase, drop tokens with any
/// non-alphabetic character, drop stop words, stem.
///
/// Indexer and searcher both go through this function; a record's
/// `term_frequencies` keys and a query's stems only meet if they agree.
pub fn normalize(text: &str) -> Vec<String> {
    let mut stems = Vec::new();
    for raw in text.split_whitespace() {
        let token = raw.to_lowercase();
        if !is_alphabetic(&token) || is_stopword(&token) { continue; }
        stems.push(STEMMER.stem(&token).into_owned());
    }
    stems
}
