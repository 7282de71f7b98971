// src/erros.rs
use std::fmt;

/// Falhas possíveis durante a avaliação de uma expressão canônica.
///
/// Quem consome o núcleo decide o que mostrar; a convenção das interfaces
/// deste pacote é exibir apenas "Erro" e guardar a causa para diagnóstico.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErroAvaliacao {
    /// Expressão malformada: operando faltando, parêntese sem par,
    /// identificador desconhecido.
    ExpressaoInvalida,
    DivisaoPorZero,
    FatorialDeNegativo,
    /// Operando fora do domínio da operação (fatorial fracionário,
    /// raiz de negativo, estouro da aritmética decimal).
    OperandoNaoSuportado,
}

impl fmt::Display for ErroAvaliacao {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ErroAvaliacao::ExpressaoInvalida => write!(f, "Expressão inválida"),
            ErroAvaliacao::DivisaoPorZero => {
                write!(f, "Não é possível dividir por zero")
            }
            ErroAvaliacao::FatorialDeNegativo => {
                write!(f, "Fatorial exige um inteiro não negativo")
            }
            ErroAvaliacao::OperandoNaoSuportado => {
                write!(f, "Operando fora do intervalo suportado")
            }
        }
    }
}

impl std::error::Error for ErroAvaliacao {}
