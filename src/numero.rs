// src/numero.rs
//! Composição de numerais falados em português.
//!
//! A gramática é aditiva: unidades, dezenas e centenas se somam no
//! acumulador corrente; palavras de escala (mil, milhão, bilhão)
//! multiplicam o que já foi dito e zeram o acumulador. Dígitos
//! literais entram na soma como as palavras ("1 milhão" compõe um
//! número só). Um marcador decimal ("vírgula", "ponto") muda para o
//! modo fracionário, em que os dígitos são concatenados literalmente,
//! preservando zeros à esquerda ("dez vírgula zero cinco" vira 10,05).

use rust_decimal::Decimal;

use crate::lexico::lexico;
use crate::normalizador::normalizar;

/// Numeral composto a partir de uma sequência de palavras.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NumeroComposto {
    /// Forma mostrada ao usuário, com vírgula decimal.
    pub exibicao: String,
    /// Forma canônica, com ponto decimal.
    pub canonica: String,
    /// Índice da primeira palavra não consumida.
    pub proximo: usize,
}

/// Compõe o numeral que começa em `palavras[inicio]`.
///
/// Devolve `None` quando a posição não inicia numeral nenhum. Palavras de
/// enchimento no meio são puladas, a menos que iniciem uma frase-operador
/// (aí a composição para antes delas, para "dois e igual" não engolir o
/// "e" do comando).
pub fn compor_numero(palavras: &[&str], inicio: usize) -> Option<NumeroComposto> {
    let lex = lexico();
    let mut idx = inicio;
    let mut total = Decimal::ZERO;
    let mut atual = Decimal::ZERO;
    let mut achou = false;

    if idx >= palavras.len() {
        return None;
    }

    let comeca_decimal = lex.e_marcador_decimal(palavras[idx]);

    if !comeca_decimal {
        while idx < palavras.len() {
            let palavra = normalizar(palavras[idx]);
            if lex.e_marcador_decimal(&palavra) {
                break;
            }

            if let Some(entrada) = lex.numero(&palavra) {
                achou = true;
                if entrada.valor.scale() > 0 {
                    // pi, euler, meia: valem o que valem, sem escala
                    atual += entrada.valor;
                } else if entrada.escala {
                    let mut base = total + atual;
                    if base.is_zero() {
                        base = Decimal::ONE;
                    }
                    total = base * entrada.valor;
                    atual = Decimal::ZERO;
                } else {
                    atual += entrada.valor;
                }
                idx += 1;
                continue;
            }

            // dígitos literais misturam com as palavras: "1 milhão"
            if !palavra.is_empty() && palavra.chars().all(|c| c.is_ascii_digit()) {
                if let Ok(valor) = palavra.parse::<Decimal>() {
                    achou = true;
                    atual += valor;
                    idx += 1;
                    continue;
                }
            }

            if lex.e_enchimento(&palavra) {
                if lex.comeca_com_operador(palavras, idx) {
                    break;
                }
                idx += 1;
                continue;
            }

            break;
        }
        total += atual;
    }

    if !achou && !comeca_decimal {
        return None;
    }

    if idx < palavras.len() && lex.e_marcador_decimal(palavras[idx]) {
        idx += 1;
        let mut fracao = String::new();
        while idx < palavras.len() {
            let palavra = normalizar(palavras[idx]);
            if lex.e_marcador_decimal(&palavra) || lex.operador_frase(&palavra).is_some() {
                break;
            }
            if let Some(entrada) = lex.numero(&palavra) {
                if entrada.valor.scale() > 0 {
                    break;
                }
                fracao.push_str(&entrada.valor.to_string());
                idx += 1;
                continue;
            }
            if palavra.chars().all(|c| c.is_ascii_digit()) && !palavra.is_empty() {
                fracao.push_str(&palavra);
                idx += 1;
                continue;
            }
            if lex.e_enchimento(&palavra) {
                if lex.comeca_com_operador(palavras, idx) {
                    break;
                }
                idx += 1;
                continue;
            }
            break;
        }

        let inteiro = total.to_string();
        let (canonica, exibicao) = if fracao.is_empty() {
            (inteiro.clone(), inteiro.replace('.', ","))
        } else {
            (
                format!("{}.{}", inteiro, fracao),
                format!("{},{}", inteiro.replace('.', ","), fracao),
            )
        };
        return Some(NumeroComposto {
            exibicao,
            canonica,
            proximo: idx,
        });
    }

    let canonica = total.to_string();
    let exibicao = canonica.replace('.', ",");
    Some(NumeroComposto {
        exibicao,
        canonica,
        proximo: idx,
    })
}
