//! Text normalization and tokenization.
//!
//! `clean_text` runs once per document before chunking and strips extraction
//! noise. `tokenize` runs on every chunk and every query: it lowercases,
//! splits on runs of word characters and drops short tokens and Portuguese
//! stop words.

use std::collections::HashSet;
use std::sync::LazyLock;

/// Tokens with this many characters or fewer are discarded.
const MAX_DISCARDED_TOKEN_CHARS: usize = 2;

/// Punctuation that survives `clean_text`.
const KEPT_PUNCTUATION: &[char] = &['-', '.', ',', ';', ':', '!', '?', '(', ')'];

static STOP_WORDS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    [
        // Prepositions and conjunctions
        "a", "ao", "aos", "as", "à", "às", "ante", "após", "até", "com", "contra", "de", "desde",
        "em", "entre", "para", "per", "perante", "por", "sem", "sob", "sobre", "trás", "e", "mas",
        "nem", "ou", "logo", "pois", "porém", "contudo", "todavia", "entretanto", "senão", "que",
        "se", "como", "quando", "onde", "porque", "porquê", "qual", "quais", "quanto", "quantos",
        "quanta", "quantas", "quem",
        // Articles, demonstratives and pronouns
        "o", "os", "um", "uma", "uns", "umas", "este", "esta", "estes", "estas", "esse", "essa",
        "esses", "essas", "aquele", "aquela", "aqueles", "aquelas", "isto", "isso", "aquilo", "eu",
        "tu", "ele", "ela", "nós", "vós", "eles", "elas", "me", "mim", "comigo", "te", "ti",
        "contigo", "si", "consigo", "nos", "conosco", "vos", "convosco", "lhe", "lhes", "meu",
        "minha", "meus", "minhas", "teu", "tua", "teus", "tuas", "seu", "sua", "seus", "suas",
        "nosso", "nossa", "nossos", "nossas", "vosso", "vossa", "vossos", "vossas",
        // Contractions
        "do", "da", "dos", "das", "no", "na", "nas", "pelo", "pela", "pelos", "pelas", "num",
        "numa", "nuns", "numas", "dum", "duma", "duns", "dumas",
        // High-frequency verbs
        "ser", "estar", "ter", "haver", "ir", "vir", "dar", "fazer", "dizer", "ver", "saber",
        "poder", "querer", "ficar", "parecer", "deixar", "passar", "chegar", "trazer", "levar",
        "encontrar", "sentir", "continuar", "começar", "acabar", "entrar", "sair", "voltar",
        // Low-signal adverbs and adjectives
        "muito", "mais", "menos", "bem", "mal", "melhor", "pior", "maior", "menor", "grande",
        "pequeno", "novo", "velho", "primeiro", "último", "outro", "mesmo", "todo", "cada",
        "algum", "nenhum", "qualquer", "certo", "tanto", "pouco", "bastante", "demais", "já",
        "ainda", "sempre", "nunca", "hoje", "ontem", "amanhã", "agora", "depois", "antes", "aqui",
        "ali", "lá", "aí", "cá", "dentro", "fora", "cima", "baixo", "perto", "longe", "sim", "não",
        "talvez", "também", "só", "apenas", "inclusive",
    ]
    .into_iter()
    .collect()
});

/// Letters, digits and underscore.
fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Returns `true` if `token` is in the stop-word list.
pub fn is_stop_word(token: &str) -> bool {
    STOP_WORDS.contains(token)
}

/// Split text into normalized tokens.
///
/// Order and multiplicity are preserved, since term frequency depends on
/// both. Never fails; empty or noise-only input yields an empty vector.
pub fn tokenize(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !is_word_char(c))
        .filter(|word| word.chars().count() > MAX_DISCARDED_TOKEN_CHARS)
        .filter(|word| !is_stop_word(word))
        .map(str::to_string)
        .collect()
}

/// Strip extraction noise from a raw document.
///
/// Every character that is not a word character, whitespace or kept
/// punctuation becomes a space, then all whitespace runs, line breaks
/// included, collapse to one space. The result is a single line, and it is
/// discarded as noise when `min_line_chars` characters or fewer remain.
pub fn clean_text(text: &str, min_line_chars: usize) -> String {
    let stripped: String = text
        .chars()
        .map(|c| {
            if is_word_char(c) || KEPT_PUNCTUATION.contains(&c) {
                c
            } else {
                ' '
            }
        })
        .collect();

    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.chars().count() > min_line_chars {
        collapsed
    } else {
        String::new()
    }
}
