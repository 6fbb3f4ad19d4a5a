use serde::Deserialize;

// Both lists follow `pkg/namesgenerator/names-generator.go` in moby/moby at
// tag v24.0.0; diff against that file when updating. Keep them sorted and
// only add words that appear upstream: a missing word makes the classifier
// stricter, an extra one deletes containers that were named by hand.

/// Adjectives the Docker engine draws from when naming a container
const ADJECTIVES: &[&str] = &[
    "admiring", "adoring", "affectionate", "agitated", "amazing", "angry", "awesome", "beautiful",
    "blissful", "bold", "boring", "brave", "busy", "charming", "clever", "compassionate",
    "competent", "condescending", "confident", "cool", "cranky", "crazy", "dazzling",
    "determined", "distracted", "dreamy", "eager", "ecstatic", "elastic", "elated", "elegant",
    "eloquent", "epic", "exciting", "fervent", "festive", "flamboyant", "focused", "friendly",
    "frosty", "funny", "gallant", "gifted", "goofy", "gracious", "great", "happy", "hardcore",
    "heuristic", "hopeful", "hungry", "infallible", "inspiring", "intelligent", "interesting",
    "jolly", "jovial", "keen", "kind", "laughing", "loving", "lucid", "magical", "modest",
    "musing", "mystifying", "naughty", "nervous", "nice", "nifty", "nostalgic", "objective",
    "optimistic", "peaceful", "pedantic", "pensive", "practical", "priceless", "quirky",
    "quizzical", "recursing", "relaxed", "reverent", "romantic", "sad", "serene", "sharp",
    "silly", "sleepy", "stoic", "strange", "stupefied", "suspicious", "sweet", "tender",
    "thirsty", "trusting", "unruffled", "upbeat", "vibrant", "vigilant", "vigorous", "wizardly",
    "wonderful", "xenodochial", "youthful", "zealous", "zen",
];

/// Surnames the Docker engine draws from when naming a container
const SURNAMES: &[&str] = &[
    "agnesi", "albattani", "allen", "almeida", "antonelli", "archimedes", "ardinghelli",
    "aryabhata", "austin", "babbage", "banach", "banzai", "bardeen", "bartik", "bassi", "beaver",
    "bell", "benz", "bhabha", "bhaskara", "black", "blackburn", "blackwell", "bohr", "booth",
    "borg", "bose", "bouman", "boyd", "brahmagupta", "brattain", "brown", "buck", "burnell",
    "cannon", "carson", "cartwright", "carver", "cerf", "chandrasekhar", "chaplygin",
    "chatelet", "chatterjee", "chaum", "chebyshev", "clarke", "cohen", "colden", "cori", "cray",
    "curie", "curran", "darwin", "davinci", "dewdney", "dhawan", "diffie", "dijkstra", "dirac",
    "driscoll", "dubinsky", "easley", "edison", "einstein", "elbakyan", "elgamal", "elion",
    "ellis", "engelbart", "euclid", "euler", "faraday", "feistel", "fermat", "fermi", "feynman",
    "franklin", "gagarin", "galileo", "galois", "ganguly", "gates", "gauss", "germain",
    "goldberg", "goldstine", "goldwasser", "golick", "goodall", "gould", "greider",
    "grothendieck", "haibt", "hamilton", "haslett", "hawking", "heisenberg", "hellman",
    "hermann", "herschel", "hertz", "heyrovsky", "hodgkin", "hofstadter", "hoover", "hopper",
    "hugle", "hypatia", "ishizaka", "jackson", "jang", "jemison", "jennings", "jepsen",
    "johnson", "joliot", "jones", "kalam", "kapitsa", "kare", "keldysh", "keller", "kepler",
    "khayyam", "khorana", "kilby", "kirch", "knuth", "kowalevski", "lalande", "lamarr",
    "lamport", "leakey", "leavitt", "lederberg", "lehmann", "lewin", "lichterman", "liskov",
    "lovelace", "lumiere", "mahavira", "margulis", "matsumoto", "maxwell", "mayer", "mccarthy",
    "mcclintock", "mclaren", "mclean", "mcnulty", "meitner", "mendel", "mendeleev", "meninsky",
    "merkle", "mestorf", "mirzakhani", "montalcini", "moore", "morse", "moser", "murdock",
    "napier", "nash", "neumann", "newton", "nightingale", "nobel", "noether", "northcutt",
    "noyce", "panini", "pare", "pascal", "pasteur", "payne", "perlman", "pike", "poincare",
    "poitras", "proskuriakova", "ptolemy", "raman", "ramanujan", "rhodes", "ride", "ritchie",
    "robinson", "roentgen", "rosalind", "rubin", "saha", "sammet", "sanderson", "satoshi",
    "shamir", "shannon", "shaw", "shirley", "shockley", "shtern", "sinoussi", "snyder",
    "solomon", "spence", "stonebraker", "sutherland", "swanson", "swartz", "swirles", "taussig",
    "tesla", "tharp", "thompson", "torvalds", "tu", "turing", "varahamihira", "vaughan",
    "villani", "visvesvaraya", "volhard", "wescoff", "wilbur", "wiles", "williams",
    "williamson", "wilson", "wing", "wozniak", "wright", "wu", "yalow", "yonath", "zhukovsky",
];

/// How strictly a name must resemble the runtime's generator output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ClassifierStrategy {
    /// Both words must come from the engine's vocabulary
    #[default]
    Dictionary,
    /// Only the `adjective_surname[digits]` shape is checked
    Structural,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NameClassifier {
    strategy: ClassifierStrategy,
}

impl NameClassifier {
    pub fn new(strategy: ClassifierStrategy) -> Self {
        Self { strategy }
    }

    pub fn strategy(&self) -> ClassifierStrategy {
        self.strategy
    }

    /// Returns true when `name` looks like it was generated by the runtime.
    ///
    /// Anything ambiguous is treated as operator-chosen: a false negative
    /// only leaves a container behind, a false positive deletes it.
    pub fn is_auto_generated(&self, name: &str) -> bool {
        let Some((adjective, surname)) = split_generated(name) else {
            return false;
        };

        match self.strategy {
            ClassifierStrategy::Structural => true,
            ClassifierStrategy::Dictionary => {
                // The engine re-rolls this pair, so it never reaches a container
                if adjective == "boring" && surname == "wozniak" {
                    return false;
                }
                ADJECTIVES.binary_search(&adjective).is_ok()
                    && SURNAMES.binary_search(&surname).is_ok()
            }
        }
    }
}

/// Classifies with the default dictionary strategy
pub fn is_auto_generated_name(name: &str) -> bool {
    NameClassifier::default().is_auto_generated(name)
}

/// Splits `adjective_surname[digits]` into its two words, digits dropped
fn split_generated(name: &str) -> Option<(&str, &str)> {
    let (adjective, rest) = name.split_once('_')?;
    let surname = rest.trim_end_matches(|c: char| c.is_ascii_digit());

    let lowercase_word = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_lowercase());
    if !lowercase_word(adjective) || !lowercase_word(surname) {
        return None;
    }

    Some((adjective, surname))
}
