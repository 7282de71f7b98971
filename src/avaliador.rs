// src/avaliador.rs
//! Avaliação de expressões canônicas com aritmética decimal exata.
//!
//! A entrada pode vir na forma canônica ("5*(3+1)") ou na forma de
//! exibição ("5 × ( 3 + 1 )"); uma pré-passagem converte os símbolos de
//! exibição e a vírgula decimal. Depois disso a expressão é tokenizada
//! e avaliada com duas pilhas, números e operadores, respeitando
//! precedência: `^` acima de `*` `/` `%`, que ficam acima de `+` `-`.
//! `^` associa à direita, o resto à esquerda.

use logos::Logos;
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

use crate::erros::ErroAvaliacao;
use crate::lexico::Funcao;

/// Casas decimais do quociente: divisões fecham em dez casas, com
/// arredondamento para cima no meio do caminho. Funções transcendentes
/// usam o mesmo fecho.
pub const CASAS_DIVISAO: u32 = 10;

#[derive(Logos, Debug, PartialEq, Clone)]
enum TokenExpressao {
    #[regex(r"[0-9]+(\.[0-9]+)?", |lex| lex.slice().parse::<Decimal>().ok())]
    Numero(Decimal),

    #[regex(r"[a-z][a-z0-9]*", |lex| lex.slice().to_string())]
    Identificador(String),

    #[token("+")]
    Mais,

    #[token("-")]
    Menos,

    #[token("*")]
    Vezes,

    #[token("/")]
    Dividido,

    #[token("%")]
    Porcento,

    #[token("^")]
    Potencia,

    #[token("!")]
    Fatorial,

    #[token("(")]
    AbreParentese,

    #[token(")")]
    FechaParentese,

    #[regex(r"[\s\t\n]+", logos::skip)]
    Whitespace,
}

/// Itens da pilha de operadores.
#[derive(Debug, Clone, PartialEq)]
enum ItemPilha {
    Operacao(char),
    Abre,
    Funcao(Funcao),
}

/// Avalia a expressão e devolve o valor decimal exato.
/// Expressão vazia vale zero.
pub fn avaliar(expressao: &str) -> Result<Decimal, ErroAvaliacao> {
    let canonica = canonicalizar(expressao);
    let tokens: Vec<TokenExpressao> = TokenExpressao::lexer(&canonica)
        .filter_map(|token| token.ok())
        .collect();
    if tokens.is_empty() {
        return Ok(Decimal::ZERO);
    }
    avaliar_tokens(&tokens)
}

/// Avalia e formata no padrão de exibição: vírgula decimal, sem zeros
/// finais.
pub fn avaliar_formatado(expressao: &str) -> Result<String, ErroAvaliacao> {
    let resultado = avaliar(expressao)?;
    Ok(formatar_decimal(resultado))
}

/// Versão de balcão: devolve o número formatado ou a palavra "Erro",
/// sem expor a causa.
pub fn avaliar_ou_erro(expressao: &str) -> String {
    match avaliar_formatado(expressao) {
        Ok(texto) => texto,
        Err(_) => "Erro".to_string(),
    }
}

/// Formata um decimal para exibição: zeros finais removidos e vírgula
/// no lugar do ponto.
pub fn formatar_decimal(valor: Decimal) -> String {
    if valor.is_zero() {
        return "0".to_string();
    }
    valor.normalize().to_string().replace('.', ",")
}

fn canonicalizar(expressao: &str) -> String {
    expressao
        .replace('×', "*")
        .replace('÷', "/")
        .replace('−', "-")
        .replace(',', ".")
        .replace('√', " sqrt ")
}

fn avaliar_tokens(tokens: &[TokenExpressao]) -> Result<Decimal, ErroAvaliacao> {
    let mut numeros: Vec<Decimal> = Vec::new();
    let mut operadores: Vec<ItemPilha> = Vec::new();
    // decide se um '-' é sinal ou subtração
    let mut anterior_era_operador = true;

    let mut i = 0;
    while i < tokens.len() {
        match &tokens[i] {
            TokenExpressao::Numero(numero) => {
                numeros.push(*numero);
                anterior_era_operador = false;
            }
            TokenExpressao::Identificador(nome) => {
                let funcao =
                    Funcao::do_nome(nome).ok_or(ErroAvaliacao::ExpressaoInvalida)?;
                operadores.push(ItemPilha::Funcao(funcao));
                anterior_era_operador = true;
            }
            TokenExpressao::AbreParentese => {
                operadores.push(ItemPilha::Abre);
                anterior_era_operador = true;
            }
            TokenExpressao::FechaParentese => {
                loop {
                    match operadores.last() {
                        Some(ItemPilha::Operacao(operacao)) => {
                            let operacao = *operacao;
                            operadores.pop();
                            aplicar_binario(operacao, &mut numeros)?;
                        }
                        Some(ItemPilha::Abre) => {
                            operadores.pop();
                            break;
                        }
                        // função sem parêntese próprio ou ')' sobrando
                        _ => break,
                    }
                }
                if let Some(ItemPilha::Funcao(_)) = operadores.last() {
                    if let Some(ItemPilha::Funcao(funcao)) = operadores.pop() {
                        let operando =
                            numeros.pop().ok_or(ErroAvaliacao::ExpressaoInvalida)?;
                        numeros.push(aplicar_funcao(funcao, operando)?);
                    }
                }
                anterior_era_operador = false;
            }
            TokenExpressao::Fatorial => {
                let operando = numeros.pop().ok_or(ErroAvaliacao::ExpressaoInvalida)?;
                numeros.push(fatorial(operando)?);
                anterior_era_operador = false;
            }
            TokenExpressao::Menos if anterior_era_operador => {
                // menos unário: prefixa o número seguinte
                match tokens.get(i + 1) {
                    Some(TokenExpressao::Numero(numero)) => {
                        numeros.push(-*numero);
                        anterior_era_operador = false;
                        i += 2;
                        continue;
                    }
                    _ => return Err(ErroAvaliacao::ExpressaoInvalida),
                }
            }
            TokenExpressao::Mais
            | TokenExpressao::Menos
            | TokenExpressao::Vezes
            | TokenExpressao::Dividido
            | TokenExpressao::Porcento
            | TokenExpressao::Potencia => {
                let novo = simbolo_binario(&tokens[i]);
                while let Some(ItemPilha::Operacao(topo)) = operadores.last() {
                    if aplica_antes(*topo, novo) {
                        let topo = *topo;
                        operadores.pop();
                        aplicar_binario(topo, &mut numeros)?;
                    } else {
                        break;
                    }
                }
                operadores.push(ItemPilha::Operacao(novo));
                anterior_era_operador = true;
            }
            TokenExpressao::Whitespace => {}
        }
        i += 1;
    }

    while let Some(item) = operadores.pop() {
        match item {
            ItemPilha::Operacao(operacao) => aplicar_binario(operacao, &mut numeros)?,
            ItemPilha::Abre | ItemPilha::Funcao(_) => {
                return Err(ErroAvaliacao::ExpressaoInvalida)
            }
        }
    }

    Ok(numeros.pop().unwrap_or(Decimal::ZERO))
}

fn simbolo_binario(token: &TokenExpressao) -> char {
    match token {
        TokenExpressao::Mais => '+',
        TokenExpressao::Menos => '-',
        TokenExpressao::Vezes => '*',
        TokenExpressao::Dividido => '/',
        TokenExpressao::Porcento => '%',
        _ => '^',
    }
}

fn precedencia(operacao: char) -> u8 {
    match operacao {
        '+' | '-' => 1,
        '*' | '/' | '%' => 2,
        '^' => 3,
        _ => 0,
    }
}

/// O topo da pilha deve ser aplicado antes de empilhar o novo operador?
/// Empate aplica o topo, exceto para `^`, que associa à direita.
fn aplica_antes(topo: char, novo: char) -> bool {
    if novo == '^' {
        precedencia(topo) > precedencia(novo)
    } else {
        precedencia(topo) >= precedencia(novo)
    }
}

fn aplicar_binario(operacao: char, numeros: &mut Vec<Decimal>) -> Result<(), ErroAvaliacao> {
    let b = numeros.pop().ok_or(ErroAvaliacao::ExpressaoInvalida)?;
    let a = numeros.pop().ok_or(ErroAvaliacao::ExpressaoInvalida)?;
    let resultado = match operacao {
        '+' => a
            .checked_add(b)
            .ok_or(ErroAvaliacao::OperandoNaoSuportado)?,
        '-' => a
            .checked_sub(b)
            .ok_or(ErroAvaliacao::OperandoNaoSuportado)?,
        '*' => a
            .checked_mul(b)
            .ok_or(ErroAvaliacao::OperandoNaoSuportado)?,
        '/' => dividir(a, b)?,
        '%' => {
            // "a % b" lê-se "b por cento de a"
            let taxa = dividir(b, dec!(100))?;
            a.checked_mul(taxa)
                .ok_or(ErroAvaliacao::OperandoNaoSuportado)?
        }
        '^' => potencia(a, b)?,
        _ => return Err(ErroAvaliacao::ExpressaoInvalida),
    };
    numeros.push(resultado);
    Ok(())
}

fn dividir(a: Decimal, b: Decimal) -> Result<Decimal, ErroAvaliacao> {
    if b.is_zero() {
        return Err(ErroAvaliacao::DivisaoPorZero);
    }
    let quociente = a
        .checked_div(b)
        .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    Ok(quociente.round_dp_with_strategy(CASAS_DIVISAO, RoundingStrategy::MidpointAwayFromZero))
}

/// Potência com expoente truncado para inteiro, preservando o
/// comportamento histórico da calculadora: "2 ^ 2,9" vale 4.
fn potencia(base: Decimal, expoente: Decimal) -> Result<Decimal, ErroAvaliacao> {
    let inteiro = expoente
        .trunc()
        .to_i64()
        .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    if inteiro == 0 {
        return Ok(Decimal::ONE);
    }
    let negativo = inteiro < 0;
    let mut expoente_restante = inteiro.unsigned_abs();
    let mut resultado = Decimal::ONE;
    let mut fator = base;
    loop {
        if expoente_restante & 1 == 1 {
            resultado = resultado
                .checked_mul(fator)
                .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
        }
        expoente_restante >>= 1;
        if expoente_restante == 0 {
            break;
        }
        fator = fator
            .checked_mul(fator)
            .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    }
    if negativo {
        dividir(Decimal::ONE, resultado)
    } else {
        Ok(resultado)
    }
}

/// Fatorial exato de um inteiro não negativo.
fn fatorial(valor: Decimal) -> Result<Decimal, ErroAvaliacao> {
    if valor.is_sign_negative() && !valor.is_zero() {
        return Err(ErroAvaliacao::FatorialDeNegativo);
    }
    if !valor.fract().is_zero() {
        return Err(ErroAvaliacao::OperandoNaoSuportado);
    }
    let n = valor
        .to_u64()
        .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    let mut resultado = Decimal::ONE;
    for fator in 2..=n {
        resultado = resultado
            .checked_mul(Decimal::from(fator))
            .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    }
    Ok(resultado)
}

/// Funções transcendentes passam pelo f64 e voltam fechadas em dez
/// casas. Seno, cosseno e tangente recebem radianos.
fn aplicar_funcao(funcao: Funcao, operando: Decimal) -> Result<Decimal, ErroAvaliacao> {
    let x = operando
        .to_f64()
        .ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    let bruto = match funcao {
        Funcao::Raiz => x.sqrt(),
        Funcao::Seno => x.sin(),
        Funcao::Cosseno => x.cos(),
        Funcao::Tangente => x.tan(),
        Funcao::Log => x.log10(),
        Funcao::Ln => x.ln(),
    };
    if !bruto.is_finite() {
        return Err(ErroAvaliacao::OperandoNaoSuportado);
    }
    let decimal = Decimal::from_f64(bruto).ok_or(ErroAvaliacao::OperandoNaoSuportado)?;
    Ok(decimal.round_dp_with_strategy(CASAS_DIVISAO, RoundingStrategy::MidpointAwayFromZero))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_aritmetica_basica() {
        assert_eq!(avaliar("5+3"), Ok(dec!(8)));
        assert_eq!(avaliar("21-10"), Ok(dec!(11)));
        assert_eq!(avaliar("2000*3"), Ok(dec!(6000)));
        assert_eq!(avaliar_formatado("100/5"), Ok("20".to_string()));
    }

    #[test]
    fn test_precedencia() {
        assert_eq!(avaliar("10+5*2"), Ok(dec!(20)));
        assert_eq!(avaliar("10-4/2"), Ok(dec!(8)));
        assert_eq!(avaliar_formatado("2+3*4-1"), Ok("13".to_string()));
    }

    #[test]
    fn test_parenteses() {
        assert_eq!(avaliar("(10+5)*2"), Ok(dec!(30)));
        assert_eq!(avaliar("(2+3)*(4-1)"), Ok(dec!(15)));
    }

    #[test]
    fn test_forma_de_exibicao_aceita() {
        assert_eq!(avaliar("5 × 3"), Ok(dec!(15)));
        assert_eq!(avaliar("10 ÷ 4"), Ok(dec!(2.5)));
        assert_eq!(avaliar("7 − 2"), Ok(dec!(5)));
        assert_eq!(avaliar("3,5 + 1,5"), Ok(dec!(5.0)));
    }

    #[test]
    fn test_divisao_fecha_em_dez_casas() {
        assert_eq!(avaliar("1/3"), Ok(dec!(0.3333333333)));
        assert_eq!(avaliar("2/3"), Ok(dec!(0.6666666667)));
        assert_eq!(avaliar("-2/3"), Ok(dec!(-0.6666666667)));
        assert_eq!(avaliar_formatado("1000/2"), Ok("500".to_string()));
    }

    #[test]
    fn test_divisao_por_zero() {
        assert_eq!(avaliar("5/0"), Err(ErroAvaliacao::DivisaoPorZero));
        assert_eq!(avaliar_ou_erro("5/0"), "Erro");
    }

    #[test]
    fn test_menos_unario() {
        assert_eq!(avaliar("-5+8"), Ok(dec!(3)));
        assert_eq!(avaliar("5*-3"), Ok(dec!(-15)));
        assert_eq!(avaliar("(-4)"), Ok(dec!(-4)));
        assert_eq!(avaliar("-"), Err(ErroAvaliacao::ExpressaoInvalida));
    }

    #[test]
    fn test_porcento_binario() {
        // 50 % 10 = dez por cento de cinquenta
        assert_eq!(avaliar_formatado("50%10"), Ok("5".to_string()));
        assert_eq!(avaliar_formatado("200%25"), Ok("50".to_string()));
    }

    #[test]
    fn test_porcentagem_canonica_do_interprete() {
        assert_eq!(avaliar_formatado("20*0.01+5"), Ok("5,2".to_string()));
        assert_eq!(avaliar_formatado("10*0.01*50"), Ok("5".to_string()));
    }

    #[test]
    fn test_potencia() {
        assert_eq!(avaliar("5^2"), Ok(dec!(25)));
        assert_eq!(avaliar("3^3"), Ok(dec!(27)));
        assert_eq!(avaliar("2^10"), Ok(dec!(1024)));
        // associa à direita: 2^(3^2)
        assert_eq!(avaliar("2^3^2"), Ok(dec!(512)));
        assert_eq!(avaliar("2^0"), Ok(dec!(1)));
        assert_eq!(avaliar_formatado("2^-2"), Ok("0,25".to_string()));
        // expoente fracionário é truncado
        assert_eq!(avaliar("2^2,9"), Ok(dec!(4)));
    }

    #[test]
    fn test_fatorial() {
        assert_eq!(avaliar("0!"), Ok(dec!(1)));
        assert_eq!(avaliar("5!"), Ok(dec!(120)));
        assert_eq!(avaliar("10!"), Ok(dec!(3628800)));
        assert_eq!(avaliar("3!+1"), Ok(dec!(7)));
        assert_eq!(avaliar("-3!"), Err(ErroAvaliacao::FatorialDeNegativo));
        assert_eq!(avaliar("2,5!"), Err(ErroAvaliacao::OperandoNaoSuportado));
        // 28! estoura o decimal de 96 bits
        assert_eq!(avaliar("28!"), Err(ErroAvaliacao::OperandoNaoSuportado));
    }

    #[test]
    fn test_funcoes() {
        assert_eq!(avaliar("sqrt(16)"), Ok(dec!(4)));
        assert_eq!(avaliar("sqrt(2)"), Ok(dec!(1.4142135624)));
        assert_eq!(avaliar("√ ( 16 )"), Ok(dec!(4)));
        assert_eq!(avaliar("sin(0)"), Ok(dec!(0)));
        assert_eq!(avaliar("cos(0)"), Ok(dec!(1)));
        assert_eq!(avaliar("log10(100)"), Ok(dec!(2)));
        assert_eq!(avaliar("log(100)"), Ok(dec!(2)));
        assert_eq!(avaliar("ln(1)"), Ok(dec!(0)));
        assert_eq!(avaliar("sqrt(9)+sqrt(4)"), Ok(dec!(5)));
        assert_eq!(avaliar("tan(0)"), Ok(dec!(0)));
        // resto de sin em pi truncado fica no décimo primeiro dígito
        assert_eq!(avaliar("sin(3,1415926535)"), Ok(dec!(0.0000000001)));
    }

    #[test]
    fn test_funcoes_fora_do_dominio() {
        assert_eq!(avaliar("sqrt(-4)"), Err(ErroAvaliacao::OperandoNaoSuportado));
        assert_eq!(avaliar("ln(0)"), Err(ErroAvaliacao::OperandoNaoSuportado));
        assert_eq!(avaliar("log10(-1)"), Err(ErroAvaliacao::OperandoNaoSuportado));
    }

    #[test]
    fn test_expressao_vazia_vale_zero() {
        assert_eq!(avaliar(""), Ok(Decimal::ZERO));
        assert_eq!(avaliar("   "), Ok(Decimal::ZERO));
        assert_eq!(avaliar_formatado(""), Ok("0".to_string()));
    }

    #[test]
    fn test_expressoes_invalidas() {
        assert_eq!(avaliar("5+"), Err(ErroAvaliacao::ExpressaoInvalida));
        assert_eq!(avaliar("(5+3"), Err(ErroAvaliacao::ExpressaoInvalida));
        assert_eq!(avaliar("abc(2)"), Err(ErroAvaliacao::ExpressaoInvalida));
        assert_eq!(avaliar("!"), Err(ErroAvaliacao::ExpressaoInvalida));
        assert_eq!(avaliar_ou_erro("5+"), "Erro");
    }

    #[test]
    fn test_caracteres_estranhos_sao_ignorados() {
        // o resto da expressão segue valendo
        assert_eq!(avaliar("5@+3"), Ok(dec!(8)));
    }

    #[test]
    fn test_formatar_decimal() {
        assert_eq!(formatar_decimal(dec!(500.0000000000)), "500");
        assert_eq!(formatar_decimal(dec!(5.2000)), "5,2");
        assert_eq!(formatar_decimal(dec!(-2.5)), "-2,5");
        assert_eq!(formatar_decimal(dec!(0.000)), "0");
        assert_eq!(formatar_decimal(dec!(1234567)), "1234567");
    }

    #[test]
    fn test_multiplicacao_implicita_canonica() {
        assert_eq!(avaliar("2*(3)*sqrt(4)"), Ok(dec!(12)));
    }

    proptest! {
        #[test]
        fn test_soma_produto_e_diferenca_exatos(a in 0i64..10_000, b in 0i64..10_000) {
            prop_assert_eq!(avaliar(&format!("{}+{}", a, b)), Ok(Decimal::from(a + b)));
            prop_assert_eq!(avaliar(&format!("{}*{}", a, b)), Ok(Decimal::from(a * b)));
            prop_assert_eq!(avaliar(&format!("{}-{}", a, b)), Ok(Decimal::from(a - b)));
        }

        #[test]
        fn test_precedencia_em_qualquer_tripla(
            a in 0i64..1_000,
            b in 0i64..1_000,
            c in 0i64..1_000,
        ) {
            prop_assert_eq!(
                avaliar(&format!("{}+{}*{}", a, b, c)),
                Ok(Decimal::from(a + b * c))
            );
        }

        #[test]
        fn test_divisao_por_si_mesmo(a in 1i64..10_000) {
            prop_assert_eq!(avaliar(&format!("{}/{}", a, a)), Ok(Decimal::ONE));
        }

        #[test]
        fn test_formatar_decimal_nunca_deixa_resto(
            unidades in -1_000_000i64..1_000_000,
            casas in 0u32..10,
        ) {
            let texto = formatar_decimal(Decimal::new(unidades, casas));
            prop_assert!(!texto.contains('.'));
            prop_assert!(!texto.ends_with(','));
            if texto.contains(',') {
                prop_assert!(!texto.ends_with('0'));
            }
        }
    }
}
