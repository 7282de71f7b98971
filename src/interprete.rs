// src/interprete.rs
//! Interpretação de uma frase falada completa.
//!
//! O caminho é: normalizar, quebrar em palavras e varrer da esquerda para
//! a direita. Em cada posição tenta-se, nesta ordem: frase-operador
//! (janela de até três palavras, a mais longa vence), literal com "%"
//! colado, numeral composto, palavra de enchimento e literal de dígitos.
//! O que sobrar é ignorado sem reclamar; frase de calculadora vem de
//! reconhecimento de fala e ruído é a regra, não a exceção.

use serde::{Deserialize, Serialize};

use crate::construtor::ConstrutorExpressao;
use crate::lexico::{lexico, Simbolo};
use crate::normalizador::normalizar;
use crate::numero::compor_numero;

/// Comando de controle reconhecido no meio da fala. Limpar e apagar
/// curto-circuitam: a frase inteira vira só o comando.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TipoComando {
    Nenhum,
    Limpar,
    Apagar,
}

/// Resultado estruturado da interpretação de uma frase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultadoProcessamento {
    pub comando: TipoComando,
    /// A frase pediu o resultado ("igual", "calcular", ...)?
    pub avaliar: bool,
    /// Tokens para mostrar ao usuário, na ordem dita.
    pub tokens_exibicao: Vec<String>,
    /// Expressão canônica correspondente, pronta para o avaliador.
    pub expressao_canonica: String,
}

impl ResultadoProcessamento {
    pub fn vazio() -> Self {
        ResultadoProcessamento {
            comando: TipoComando::Nenhum,
            avaliar: false,
            tokens_exibicao: Vec::new(),
            expressao_canonica: String::new(),
        }
    }

    pub fn e_comando(&self) -> bool {
        self.comando != TipoComando::Nenhum
    }

    pub fn expressao_exibicao(&self) -> String {
        self.tokens_exibicao.join(" ")
    }
}

/// Interpreta uma frase falada e devolve o resultado estruturado.
pub fn processar(texto: &str) -> ResultadoProcessamento {
    let normalizado = normalizar(texto);
    if normalizado.is_empty() {
        return ResultadoProcessamento::vazio();
    }
    let palavras: Vec<&str> = normalizado.split(' ').filter(|p| !p.is_empty()).collect();
    if palavras.is_empty() {
        return ResultadoProcessamento::vazio();
    }

    let lex = lexico();
    let mut construtor = ConstrutorExpressao::novo();
    let mut comando = TipoComando::Nenhum;
    let mut avaliar = false;

    let mut i = 0;
    while i < palavras.len() {
        if let Some(casamento) = lex.procurar_operador(&palavras, i) {
            let consumidas = casamento.palavras;
            match casamento.simbolo {
                Simbolo::Limpar => {
                    comando = TipoComando::Limpar;
                    construtor = ConstrutorExpressao::novo();
                    break;
                }
                Simbolo::Apagar => {
                    comando = TipoComando::Apagar;
                    construtor = ConstrutorExpressao::novo();
                    break;
                }
                Simbolo::Igual => avaliar = true,
                Simbolo::Mais => construtor.adicionar_operador("+", "+"),
                Simbolo::Menos => construtor.adicionar_operador("-", "−"),
                Simbolo::Vezes => construtor.adicionar_operador("*", "×"),
                Simbolo::Dividido => construtor.adicionar_operador("/", "÷"),
                Simbolo::Porcento => construtor.adicionar_porcentagem(),
                Simbolo::Potencia => construtor.adicionar_operador("^", "^"),
                Simbolo::Quadrado => construtor.adicionar_potencia("2"),
                Simbolo::Cubo => construtor.adicionar_potencia("3"),
                Simbolo::AbreParentese => construtor.abrir_parentese(),
                Simbolo::FechaParentese => construtor.fechar_parentese(),
                Simbolo::Funcao(funcao) => construtor.adicionar_funcao(funcao),
                Simbolo::Fatorial => {
                    // "cinco fatorial" aplica direto; "fatorial de cinco"
                    // precisa compor o número que vem depois
                    if !construtor.adicionar_fatorial() {
                        if let Some(numero) = compor_numero(&palavras, i + consumidas) {
                            construtor.adicionar_numero(&numero.exibicao, &numero.canonica);
                            construtor.adicionar_fatorial();
                            i = numero.proximo;
                            continue;
                        }
                    }
                }
            }
            i += consumidas;
            continue;
        }

        let palavra = palavras[i];
        if let Some((exibicao, canonica)) = literal_com_porcento(palavra) {
            construtor.adicionar_numero(&exibicao, &canonica);
            construtor.adicionar_porcentagem();
            i += 1;
            continue;
        }
        if let Some(numero) = compor_numero(&palavras, i) {
            construtor.adicionar_numero(&numero.exibicao, &numero.canonica);
            i = numero.proximo;
            continue;
        }
        if lex.e_enchimento(palavra) {
            i += 1;
            continue;
        }
        if let Some((exibicao, canonica)) = literal_numerico(palavra) {
            construtor.adicionar_numero(&exibicao, &canonica);
            i += 1;
            continue;
        }
        // palavra desconhecida: segue o baile
        i += 1;
    }

    construtor.fechar_tudo();

    if comando != TipoComando::Nenhum {
        return ResultadoProcessamento {
            comando,
            avaliar: false,
            tokens_exibicao: Vec::new(),
            expressao_canonica: String::new(),
        };
    }

    let expressao_canonica = construtor.expressao_canonica();
    let tokens_exibicao = construtor.tokens_exibicao().to_vec();
    if tokens_exibicao.is_empty() || expressao_canonica.is_empty() {
        return ResultadoProcessamento::vazio();
    }
    ResultadoProcessamento {
        comando,
        avaliar,
        tokens_exibicao,
        expressao_canonica,
    }
}

/// Forma compacta do resultado: "CLEAR", "DELETE", a expressão de
/// exibição, com " =" no fim quando a frase pediu o resultado, ou ""
/// quando nada foi reconhecido.
pub fn processar_comando_voz(texto: &str) -> String {
    let resultado = processar(texto);
    match resultado.comando {
        TipoComando::Limpar => "CLEAR".to_string(),
        TipoComando::Apagar => "DELETE".to_string(),
        TipoComando::Nenhum => {
            if resultado.tokens_exibicao.is_empty() {
                return String::new();
            }
            let expressao = resultado.expressao_exibicao();
            if resultado.avaliar {
                format!("{} =", expressao)
            } else {
                expressao
            }
        }
    }
}

/// A expressão de exibição contém algo calculável?
pub fn e_comando_de_calculo(expressao: &str) -> bool {
    if expressao.is_empty() {
        return false;
    }
    ["+", "-", "−", "×", "÷", "=", "%", "√", "sin", "cos", "tan", "log", "ln", "^"]
        .iter()
        .any(|operador| expressao.contains(operador))
}

/// Há operador (falado ou simbólico) no texto? Usado para ranquear
/// hipóteses de reconhecimento.
pub fn contem_operador(texto: &str) -> bool {
    ["+", "−", "-", "×", "÷", "%", "^", "√", "sin", "cos", "tan", "log", "ln"]
        .iter()
        .any(|operador| texto.contains(operador))
}

/// Remove o "=" e espaços repetidos de uma expressão de exibição.
pub fn limpar_expressao(expressao: &str) -> String {
    let sem_igual = expressao.replace('=', "");
    sem_igual.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Versão ASCII da expressão de exibição, ou uma mensagem quando não
/// houve expressão nenhuma.
pub fn para_forma_legivel(expressao: &str) -> String {
    if expressao.is_empty() {
        return "Comando de voz não reconhecido".to_string();
    }
    expressao.replace('×', "*").replace('÷', "/")
}

fn so_digitos(texto: &str) -> bool {
    !texto.is_empty() && texto.chars().all(|c| c.is_ascii_digit())
}

/// Agrupamento de milhar à brasileira: "1.234" ou "1.234.567".
fn e_agrupamento_milhar(texto: &str) -> bool {
    let partes: Vec<&str> = texto.split('.').collect();
    if partes.len() < 2 {
        return false;
    }
    let primeira = partes[0];
    if primeira.is_empty() || primeira.len() > 3 || !so_digitos(primeira) {
        return false;
    }
    partes[1..].iter().all(|parte| parte.len() == 3 && so_digitos(parte))
}

/// Agrupamento de milhar com fração: "1.234,5".
fn e_agrupamento_milhar_com_decimal(texto: &str) -> bool {
    match texto.split_once(',') {
        Some((inteira, fracao)) => e_agrupamento_milhar(inteira) && so_digitos(fracao),
        None => false,
    }
}

/// Dígitos com no máximo um separador decimal, vírgula ou ponto.
fn e_decimal_simples(texto: &str) -> bool {
    if let Some(posicao) = texto.find(|c| c == '.' || c == ',') {
        so_digitos(&texto[..posicao]) && so_digitos(&texto[posicao + 1..])
    } else {
        so_digitos(texto)
    }
}

/// Interpreta um literal numérico digitado ou transcrito: "12", "3,5",
/// "1.234" (milhar), "1.234,5". Devolve (exibição, canônica).
fn literal_numerico(palavra: &str) -> Option<(String, String)> {
    if e_agrupamento_milhar(palavra) {
        let digitos = palavra.replace('.', "");
        return Some((digitos.clone(), digitos));
    }
    if e_agrupamento_milhar_com_decimal(palavra) {
        let sem_pontos = palavra.replace('.', "");
        let canonica = sem_pontos.replace(',', ".");
        return Some((sem_pontos, canonica));
    }
    if e_decimal_simples(palavra) {
        let canonica = palavra.replace(',', ".");
        let exibicao = palavra.replace('.', ",");
        return Some((exibicao, canonica));
    }
    None
}

/// Literal numérico com "%" colado no fim: "10%", "12,5%".
fn literal_com_porcento(palavra: &str) -> Option<(String, String)> {
    let sem_porcento = palavra.strip_suffix('%')?;
    literal_numerico(sem_porcento)
}
