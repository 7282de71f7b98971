// src/normalizador.rs
//! Normalização de texto falado antes da interpretação.
//!
//! Todo texto que entra no interpretador passa primeiro por [`normalizar`]:
//! minúsculas, acentos dobrados para ASCII e espaços em sequência reduzidos
//! a um só. A função é idempotente, então as camadas internas podem
//! normalizar de novo sem medo.

/// Canonicaliza uma frase falada: minúsculas, sem acentos, espaços simples.
pub fn normalizar(texto: &str) -> String {
    let minusculas = texto.to_lowercase();
    let mut saida = String::with_capacity(minusculas.len());
    let mut espaco_pendente = false;
    for c in minusculas.chars() {
        if c.is_whitespace() {
            // só vira espaço se já houver conteúdo (descarta os da borda)
            espaco_pendente = !saida.is_empty();
            continue;
        }
        if espaco_pendente {
            saida.push(' ');
            espaco_pendente = false;
        }
        saida.push(desacentuar(c));
    }
    saida
}

fn desacentuar(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' => 'a',
        'è' | 'é' | 'ê' => 'e',
        'ì' | 'í' | 'î' => 'i',
        'ò' | 'ó' | 'ô' | 'õ' => 'o',
        'ù' | 'ú' | 'û' => 'u',
        'ç' => 'c',
        _ => c,
    }
}

// Molduras de cortesia que o reconhecimento de fala costuma trazer junto
// com a conta em si. Comparadas sobre o texto em minúsculas, com acento.
// "igual", "resultado" e afins ficam de fora das duas listas: são a
// família do "=" e precisam chegar inteiros ao reconhecedor para ligar
// a avaliação.
const PREFIXOS_CORTESIA: &[&str] = &[
    "quanto é",
    "quanto que é",
    "quanto vale",
    "quanto que vale",
    "calcule",
    "calculate",
    "faça a conta de",
    "me diga",
    "me mostra",
    "me mostre",
    "me informe",
    "me fala",
    "me fale",
    "quero saber",
    "preciso saber",
];

const SUFIXOS_CORTESIA: &[&str] = &[
    "por favor",
    "pf",
    "pfv",
    "obrigado",
    "obrigada",
    "valeu",
    "igualmente",
];

const SUFIXOS_INTERROGACAO: &[&str] = &["ponto de interrogação", "interrogação", "?"];

/// Remove molduras de cortesia da frase ("quanto é ... por favor"),
/// deixando só a parte matemática. Cada borda é aparada no máximo uma vez.
pub fn normalizar_frase_matematica(texto: &str) -> String {
    let mut frase = texto.to_lowercase().trim().to_string();
    frase = aparar_prefixo(&frase, PREFIXOS_CORTESIA);
    frase = aparar_sufixo(&frase, SUFIXOS_CORTESIA);
    frase = aparar_sufixo(&frase, SUFIXOS_INTERROGACAO);
    frase
}

fn aparar_prefixo(frase: &str, prefixos: &[&str]) -> String {
    for prefixo in prefixos {
        if let Some(resto) = frase.strip_prefix(prefixo) {
            // o prefixo precisa ser palavra inteira, não começo de outra
            if resto.starts_with(char::is_whitespace) {
                return resto.trim_start().to_string();
            }
        }
    }
    frase.to_string()
}

fn aparar_sufixo(frase: &str, sufixos: &[&str]) -> String {
    for sufixo in sufixos {
        if let Some(resto) = frase.strip_suffix(sufixo) {
            if resto.ends_with(char::is_whitespace) {
                return resto.trim_end().to_string();
            }
        }
    }
    frase.to_string()
}
