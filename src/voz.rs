// src/voz.rs
//! Apoio à interface falada: escolha da melhor hipótese do
//! reconhecedor, descrição falada de tokens e resultados, e formatação
//! de números para o visor no padrão brasileiro.

use crate::interprete;

/// Escolhe a transcrição mais promissora entre as hipóteses do
/// reconhecedor. Cada hipótese é interpretada e pontuada: presença de
/// operador vale 2, cada caractere interpretado vale 1 até o teto de
/// 40, e um pedido de cálculo explícito vale 3. Empate fica com a
/// primeira.
pub fn escolher_melhor_hipotese(hipoteses: &[String]) -> Option<String> {
    let mut melhor: Option<String> = None;
    let mut melhor_pontos = -1i32;
    for hipotese in hipoteses {
        let texto = hipotese.trim();
        if texto.is_empty() {
            continue;
        }
        let processado = interprete::processar_comando_voz(texto);
        let mut pontos = 0i32;
        if interprete::contem_operador(&processado) {
            pontos += 2;
        }
        pontos += processado.chars().count().min(40) as i32;
        if processado.ends_with('=') {
            pontos += 3;
        }
        if pontos > melhor_pontos {
            melhor_pontos = pontos;
            melhor = Some(texto.to_string());
        }
    }
    melhor
}

/// Nome falado de um token de tecla ou de exibição. Tokens sem nome
/// próprio, como dígitos, voltam como estão.
pub fn descrever_token(token: &str) -> String {
    let descricao = match token {
        "+" => "mais",
        "−" | "-" => "menos",
        "×" | "*" => "vezes",
        "÷" | "/" => "dividido",
        "^" => "elevado",
        "%" => "por cento",
        "." | "," => "vírgula",
        "√" => "raiz quadrada",
        "(" => "abre parêntese",
        ")" => "fecha parêntese",
        "sin" => "seno",
        "cos" => "cosseno",
        "tan" => "tangente",
        "log" => "logaritmo",
        "ln" => "logaritmo natural",
        "π" | "pi" => "pi",
        "e" => "constante e",
        "RAD" | "rad" => "radiano",
        "!" => "fatorial",
        "C" => "limpar",
        "DEL" => "apagar",
        "=" => "igual",
        _ => return token.to_string(),
    };
    descricao.to_string()
}

/// Converte um resultado do visor em texto falável: sinal, vírgula e
/// por cento viram palavras.
pub fn descrever_resultado(resultado: &str) -> String {
    let falado = resultado
        .replace('-', " menos ")
        .replace(',', " vírgula ")
        .replace('%', " por cento");
    falado.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Formata um número do visor com agrupamento de milhar brasileiro.
/// Textos que não são números, como "Erro", voltam intactos.
pub fn formatar_numero_exibicao(numero: &str) -> String {
    if numero.is_empty() || numero == "Erro" || numero == "-" {
        return numero.to_string();
    }

    let negativo = numero.starts_with('-');
    let positivo = if negativo { &numero[1..] } else { numero };

    let (parte_inteira, parte_decimal) = match positivo.split_once(',') {
        Some((inteira, decimal)) => (inteira, Some(decimal)),
        None => (positivo, None),
    };
    let parte_inteira = if parte_inteira.is_empty() {
        "0"
    } else {
        parte_inteira
    };

    if !parte_inteira.chars().all(|c| c.is_ascii_digit()) {
        return numero.to_string();
    }

    let agrupada = agrupar_milhares(parte_inteira);
    let corpo = match parte_decimal {
        Some(decimal) => format!("{},{}", agrupada, decimal),
        None => agrupada,
    };
    if negativo {
        format!("-{}", corpo)
    } else {
        corpo
    }
}

/// Insere um ponto a cada três dígitos, da direita para a esquerda.
fn agrupar_milhares(digitos: &str) -> String {
    let significativos = digitos.trim_start_matches('0');
    let significativos = if significativos.is_empty() {
        "0"
    } else {
        significativos
    };

    let mut agrupado = String::new();
    let total = significativos.len();
    for (idx, c) in significativos.chars().enumerate() {
        if idx > 0 && (total - idx) % 3 == 0 {
            agrupado.push('.');
        }
        agrupado.push(c);
    }
    agrupado
}
