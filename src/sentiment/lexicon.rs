//! Word lists used by the classifier.
//!
//! Valences sit on a -4..=4 scale. Booster increments are added in the direction of the
//! word they modify (negative values dampen).

use std::collections::HashMap;
use std::sync::LazyLock;

static VALENCES: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| WORDS.iter().copied().collect());

pub(super) static BOOSTERS: LazyLock<HashMap<&'static str, f64>> =
    LazyLock::new(|| MODIFIERS.iter().copied().collect());

/// Inflections tried, in order, when a word is not listed as written.
const SUFFIXES: [&str; 4] = ["ing", "ed", "es", "s"];
const MIN_STEM_LEN: usize = 3;

/// Valence of a lower-cased word. Unlisted inflections ("glitching", "improved",
/// "lagged") fall back to their stem.
pub(super) fn valence(key: &str) -> Option<f64> {
    if let Some(&valence) = VALENCES.get(key) {
        return Some(valence);
    }

    SUFFIXES
        .iter()
        .filter_map(|suffix| key.strip_suffix(suffix))
        .filter(|stem| stem.len() >= MIN_STEM_LEN)
        .find_map(stem_valence)
}

fn stem_valence(stem: &str) -> Option<f64> {
    if let Some(&valence) = VALENCES.get(stem) {
        return Some(valence);
    }
    if let Some(&valence) = VALENCES.get(format!("{stem}e").as_str()) {
        return Some(valence);
    }

    // doubled final consonant
    let mut tail = stem.chars().rev();
    match (tail.next(), tail.next()) {
        (Some(last), Some(prior)) if last == prior => {
            VALENCES.get(&stem[..stem.len() - last.len_utf8()]).copied()
        }
        _ => None,
    }
}

const INCR: f64 = 0.293;
const DECR: f64 = -0.293;

const MODIFIERS: &[(&str, f64)] = &[
    ("absolutely", INCR),
    ("amazingly", INCR),
    ("completely", INCR),
    ("deeply", INCR),
    ("especially", INCR),
    ("exceptionally", INCR),
    ("extremely", INCR),
    ("fully", INCR),
    ("highly", INCR),
    ("hugely", INCR),
    ("incredibly", INCR),
    ("particularly", INCR),
    ("purely", INCR),
    ("quite", INCR),
    ("really", INCR),
    ("remarkably", INCR),
    ("so", INCR),
    ("super", INCR),
    ("terribly", INCR),
    ("thoroughly", INCR),
    ("totally", INCR),
    ("tremendously", INCR),
    ("truly", INCR),
    ("unbelievably", INCR),
    ("utterly", INCR),
    ("very", INCR),
    ("almost", DECR),
    ("barely", DECR),
    ("hardly", DECR),
    ("kinda", DECR),
    ("marginally", DECR),
    ("occasionally", DECR),
    ("partly", DECR),
    ("scarcely", DECR),
    ("slightly", DECR),
    ("somewhat", DECR),
    ("sorta", DECR),
];

pub(super) const NEGATORS: &[&str] = &[
    "aint", "arent", "cannot", "cant", "couldnt", "didnt", "doesnt", "dont", "hadnt", "hasnt",
    "havent", "isnt", "neither", "never", "no", "nobody", "none", "nope", "nor", "not",
    "nothing", "nowhere", "shouldnt", "wasnt", "werent", "without", "wont", "wouldnt",
];

const WORDS: &[(&str, f64)] = &[
    // positive
    ("accessible", 1.3),
    ("accurate", 1.2),
    ("admire", 2.1),
    ("adorable", 2.2),
    ("advantage", 1.0),
    ("affordable", 1.3),
    ("agree", 1.5),
    ("amazed", 2.2),
    ("amazing", 2.8),
    ("appealing", 1.8),
    ("appreciate", 1.7),
    ("appreciated", 1.8),
    ("attractive", 1.9),
    ("awesome", 3.1),
    ("beautiful", 2.9),
    ("beautifully", 2.7),
    ("benefit", 2.0),
    ("benefits", 1.6),
    ("best", 3.2),
    ("better", 1.9),
    ("bright", 1.9),
    ("brilliant", 2.8),
    ("calm", 1.3),
    ("capable", 1.6),
    ("care", 2.2),
    ("celebrate", 2.7),
    ("charming", 2.8),
    ("cheerful", 2.5),
    ("clean", 1.7),
    ("clear", 1.6),
    ("clever", 2.0),
    ("comfort", 1.5),
    ("comfortable", 1.5),
    ("compliment", 2.1),
    ("confident", 2.2),
    ("congrats", 2.4),
    ("congratulations", 2.9),
    ("convenient", 1.5),
    ("cool", 1.3),
    ("creative", 1.9),
    ("cute", 2.0),
    ("delight", 2.9),
    ("delighted", 3.0),
    ("dependable", 1.7),
    ("easier", 1.8),
    ("easiest", 1.8),
    ("easily", 1.4),
    ("easy", 1.9),
    ("ecstatic", 2.3),
    ("effective", 2.1),
    ("efficient", 1.8),
    ("effortless", 1.8),
    ("elegant", 2.1),
    ("encouraging", 2.4),
    ("engaging", 1.4),
    ("enjoy", 2.2),
    ("enjoyable", 1.9),
    ("enjoyed", 2.3),
    ("enjoying", 2.4),
    ("enjoys", 2.2),
    ("enthusiastic", 1.9),
    ("excellence", 3.1),
    ("excellent", 2.7),
    ("exceptional", 1.5),
    ("excited", 1.4),
    ("exciting", 2.2),
    ("fabulous", 2.4),
    ("fair", 1.3),
    ("fantastic", 2.6),
    ("fascinating", 2.5),
    ("fast", 1.2),
    ("faster", 1.2),
    ("fastest", 1.4),
    ("fav", 2.0),
    ("fave", 1.9),
    ("favorite", 2.0),
    ("fine", 0.8),
    ("fixed", 1.1),
    ("fixes", 1.0),
    ("flawless", 2.3),
    ("flexible", 1.2),
    ("fresh", 1.3),
    ("friendly", 2.2),
    ("fun", 2.3),
    ("funny", 1.9),
    ("generous", 2.3),
    ("genius", 1.9),
    ("gentle", 1.9),
    ("glad", 2.0),
    ("glorious", 3.2),
    ("good", 1.9),
    ("gorgeous", 3.0),
    ("grateful", 2.0),
    ("gratitude", 2.3),
    ("great", 3.1),
    ("greatest", 3.2),
    ("handy", 1.4),
    ("happy", 2.7),
    ("helped", 1.4),
    ("helpful", 1.9),
    ("helping", 1.2),
    ("helps", 1.6),
    ("hero", 2.6),
    ("honest", 2.3),
    ("hope", 1.9),
    ("hopeful", 1.8),
    ("hurray", 2.7),
    ("ideal", 2.4),
    ("impressed", 2.1),
    ("impressive", 2.3),
    ("improve", 1.9),
    ("improved", 2.1),
    ("improvement", 2.0),
    ("improvements", 1.3),
    ("improves", 1.8),
    ("incredible", 3.4),
    ("innovative", 1.9),
    ("insightful", 2.1),
    ("inspiring", 2.4),
    ("interesting", 1.7),
    ("intuitive", 1.8),
    ("joy", 2.8),
    ("joyful", 2.9),
    ("kind", 2.4),
    ("kudos", 2.3),
    ("like", 2.0),
    ("liked", 1.8),
    ("likes", 1.8),
    ("lol", 1.8),
    ("love", 3.2),
    ("loved", 2.9),
    ("lovely", 2.8),
    ("loves", 2.7),
    ("loving", 2.9),
    ("lucky", 1.8),
    ("magnificent", 3.4),
    ("marvelous", 2.9),
    ("neat", 2.0),
    ("nice", 1.8),
    ("ok", 0.9),
    ("okay", 0.9),
    ("outstanding", 3.0),
    ("painless", 1.0),
    ("peaceful", 2.2),
    ("perfect", 2.7),
    ("phenomenal", 2.6),
    ("pleasant", 2.3),
    ("pleased", 1.9),
    ("pleasure", 2.7),
    ("polished", 1.6),
    ("popular", 1.8),
    ("positive", 2.6),
    ("powerful", 1.8),
    ("praise", 2.6),
    ("productive", 1.9),
    ("proud", 2.1),
    ("quick", 1.0),
    ("recommend", 1.5),
    ("recommended", 2.0),
    ("reliable", 1.9),
    ("relief", 2.1),
    ("relieved", 1.6),
    ("remarkable", 2.2),
    ("resolved", 0.7),
    ("responsive", 1.5),
    ("rocks", 1.6),
    ("safe", 1.9),
    ("satisfied", 1.8),
    ("satisfying", 2.0),
    ("seamless", 1.9),
    ("secure", 1.4),
    ("simple", 1.0),
    ("sleek", 1.8),
    ("smart", 1.7),
    ("smooth", 1.6),
    ("snappy", 1.5),
    ("solid", 1.4),
    ("spectacular", 2.6),
    ("speedy", 1.7),
    ("splendid", 2.8),
    ("stable", 1.2),
    ("stellar", 2.8),
    ("straightforward", 1.3),
    ("strong", 2.3),
    ("stunning", 1.6),
    ("success", 2.7),
    ("successful", 2.8),
    ("successfully", 2.2),
    ("superb", 3.1),
    ("superior", 2.6),
    ("support", 1.7),
    ("supportive", 1.2),
    ("sweet", 2.0),
    ("terrific", 3.3),
    ("thank", 1.5),
    ("thankful", 2.7),
    ("thanks", 1.9),
    ("thx", 1.5),
    ("tremendous", 2.4),
    ("trust", 2.3),
    ("usable", 1.3),
    ("useful", 1.9),
    ("valuable", 2.1),
    ("welcome", 2.0),
    ("win", 2.8),
    ("wonderful", 2.7),
    ("works", 0.9),
    ("worth", 0.9),
    ("worthy", 1.9),
    ("wow", 2.8),
    ("yay", 2.4),
    ("yes", 1.7),
    // negative
    ("abandon", -1.9),
    ("abysmal", -2.4),
    ("afraid", -2.2),
    ("aggravating", -2.0),
    ("alarming", -2.0),
    ("anger", -2.7),
    ("angry", -2.3),
    ("annoy", -1.9),
    ("annoyance", -1.6),
    ("annoyed", -1.6),
    ("annoying", -1.9),
    ("annoys", -1.8),
    ("anxious", -1.0),
    ("ashamed", -2.1),
    ("atrocious", -3.0),
    ("awful", -2.0),
    ("awkward", -1.4),
    ("bad", -2.5),
    ("blocked", -1.2),
    ("bogus", -2.1),
    ("boring", -1.3),
    ("bothered", -1.3),
    ("bothersome", -1.3),
    ("breaks", -1.8),
    ("broke", -1.8),
    ("broken", -2.1),
    ("bug", -0.9),
    ("buggy", -1.9),
    ("bugs", -1.2),
    ("catastrophe", -3.4),
    ("cheated", -2.3),
    ("clumsy", -1.7),
    ("clunky", -1.5),
    ("complain", -1.5),
    ("complaint", -1.2),
    ("complaints", -1.7),
    ("complicated", -1.2),
    ("concerned", -1.0),
    ("confuse", -0.9),
    ("confused", -1.3),
    ("confusing", -1.5),
    ("confusion", -1.2),
    ("corrupt", -3.0),
    ("corrupted", -2.3),
    ("crap", -1.6),
    ("crappy", -2.5),
    ("crash", -1.9),
    ("crashed", -1.9),
    ("crashes", -1.9),
    ("crashing", -1.9),
    ("crashy", -1.8),
    ("cumbersome", -1.5),
    ("damage", -2.2),
    ("damaged", -1.9),
    ("defect", -1.4),
    ("defective", -1.9),
    ("delay", -1.3),
    ("delayed", -0.9),
    ("delays", -1.5),
    ("despise", -3.1),
    ("difficult", -1.5),
    ("dirty", -1.9),
    ("disappoint", -2.2),
    ("disappointed", -1.9),
    ("disappointing", -2.2),
    ("disappointment", -2.3),
    ("disaster", -3.1),
    ("disgusting", -2.4),
    ("dislike", -1.6),
    ("dislikes", -1.7),
    ("dreadful", -2.7),
    ("dumb", -2.3),
    ("embarrassing", -1.6),
    ("error", -1.7),
    ("errors", -1.7),
    ("expensive", -1.1),
    ("fail", -2.5),
    ("failed", -2.3),
    ("failing", -2.3),
    ("fails", -2.2),
    ("failure", -2.3),
    ("fault", -1.7),
    ("faulty", -1.8),
    ("fear", -2.2),
    ("flaw", -1.7),
    ("flawed", -1.9),
    ("flaws", -1.5),
    ("freeze", -1.3),
    ("freezes", -1.3),
    ("freezing", -1.3),
    ("frozen", -1.2),
    ("frustrate", -2.0),
    ("frustrated", -2.4),
    ("frustrates", -1.9),
    ("frustrating", -2.2),
    ("frustration", -2.1),
    ("garbage", -2.2),
    ("glitch", -1.3),
    ("glitches", -1.3),
    ("glitchy", -1.5),
    ("gross", -2.1),
    ("hard", -0.4),
    ("hassle", -1.7),
    ("hate", -2.7),
    ("hated", -3.2),
    ("hates", -1.9),
    ("hating", -2.3),
    ("horrendous", -2.8),
    ("horrible", -2.5),
    ("horrific", -3.4),
    ("hurt", -2.4),
    ("hurts", -2.1),
    ("idiotic", -2.6),
    ("ignored", -1.3),
    ("impossible", -1.5),
    ("inaccurate", -1.3),
    ("inconsistent", -1.0),
    ("inconvenient", -1.4),
    ("incorrect", -1.4),
    ("insane", -1.7),
    ("insecure", -1.8),
    ("irritated", -2.0),
    ("irritating", -2.0),
    ("issue", -0.9),
    ("issues", -0.9),
    ("junk", -1.3),
    ("lacking", -1.2),
    ("lag", -1.2),
    ("lagging", -1.2),
    ("laggy", -1.5),
    ("lags", -1.0),
    ("lame", -1.8),
    ("leak", -1.4),
    ("limited", -0.9),
    ("lose", -1.7),
    ("loses", -1.3),
    ("losing", -1.6),
    ("lost", -1.3),
    ("mad", -2.2),
    ("mediocre", -1.0),
    ("mess", -1.5),
    ("messy", -1.5),
    ("misleading", -1.7),
    ("missing", -1.2),
    ("mistake", -1.4),
    ("mistakes", -1.5),
    ("nightmare", -2.9),
    ("nonsense", -1.7),
    ("outage", -1.6),
    ("outdated", -1.0),
    ("overpriced", -1.5),
    ("pain", -2.3),
    ("painful", -2.2),
    ("pathetic", -2.7),
    ("poor", -2.1),
    ("poorly", -1.6),
    ("problem", -1.7),
    ("problems", -1.7),
    ("ridiculous", -2.1),
    ("rubbish", -2.3),
    ("rude", -2.0),
    ("sad", -2.1),
    ("sadly", -1.9),
    ("scam", -2.2),
    ("scary", -2.2),
    ("shame", -2.1),
    ("slow", -1.3),
    ("sluggish", -1.7),
    ("sorry", -0.3),
    ("stuck", -1.2),
    ("stupid", -2.4),
    ("suck", -1.9),
    ("sucked", -2.0),
    ("sucks", -1.5),
    ("sucky", -1.9),
    ("terrible", -2.1),
    ("tired", -1.9),
    ("trouble", -1.7),
    ("ugly", -2.3),
    ("unacceptable", -2.0),
    ("unclear", -1.0),
    ("uncomfortable", -1.6),
    ("unfair", -2.1),
    ("unfortunate", -2.0),
    ("unfortunately", -1.4),
    ("unhappy", -1.8),
    ("unhelpful", -1.7),
    ("unintuitive", -1.4),
    ("unpleasant", -2.1),
    ("unreliable", -1.9),
    ("unresponsive", -1.3),
    ("unstable", -1.5),
    ("unsure", -1.0),
    ("unusable", -2.4),
    ("upset", -1.6),
    ("upsetting", -2.1),
    ("useless", -1.8),
    ("waste", -1.8),
    ("weak", -1.9),
    ("weird", -0.7),
    ("worried", -1.2),
    ("worry", -1.9),
    ("worse", -2.1),
    ("worst", -3.1),
    ("worthless", -1.9),
    ("wrong", -2.1),
    ("wtf", -2.8),
    ("yuck", -1.8),
];
