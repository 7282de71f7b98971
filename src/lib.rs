// src/lib.rs

//! Calculadora por Voz em Português Brasileiro
//!
//! Este projeto implementa o núcleo de uma calculadora falada, com suporte a:
//! - Interpretação de frases em português ("cinco mais três igual")
//! - Numerais compostos, frações decimais e constantes faladas
//! - Porcentagem, potência, fatorial, raiz e funções trigonométricas
//! - Avaliação decimal exata com precedência de operadores
//! - Edição por teclado com replay dos tokens reconhecidos

// Declarar módulos principais
pub mod avaliador;
pub mod construtor;
pub mod editor;
pub mod erros;
pub mod interprete;
pub mod lexico;
pub mod normalizador;
pub mod numero;
pub mod voz;

// Re-exportações básicas
pub use avaliador::{avaliar, avaliar_formatado, avaliar_ou_erro, formatar_decimal};
pub use construtor::ConstrutorExpressao;
pub use editor::{Calculadora, EstadoEditor};
pub use erros::ErroAvaliacao;
pub use interprete::{processar, processar_comando_voz, ResultadoProcessamento, TipoComando};
pub use normalizador::{normalizar, normalizar_frase_matematica};
pub use voz::{
    descrever_resultado, descrever_token, escolher_melhor_hipotese, formatar_numero_exibicao,
};

/// Interpreta uma frase completa e devolve o resultado formatado.
/// Molduras de cortesia ("quanto é", "por favor") são removidas antes.
/// Comandos de controle e frases sem matemática nenhuma são inválidos
/// aqui; quem precisa distingui-los usa [`CalculadoraVoz`].
pub fn calcular_frase(frase: &str) -> Result<String, ErroAvaliacao> {
    let limpa = normalizador::normalizar_frase_matematica(frase);
    let resultado = interprete::processar(&limpa);
    if resultado.e_comando() || resultado.expressao_canonica.is_empty() {
        return Err(ErroAvaliacao::ExpressaoInvalida);
    }
    avaliador::avaliar_formatado(&resultado.expressao_canonica)
}

/// Desfecho de uma rodada de fala contra a calculadora.
#[derive(Debug, Clone, PartialEq)]
pub enum RespostaVoz {
    NaoReconhecida,
    Limpa,
    Apagada,
    EmAndamento { expressao: String, parcial: String },
    Calculada { expressao: String, resultado: String },
    Falha { expressao: String, erro: ErroAvaliacao },
}

/// Fachada que liga o intérprete de voz ao editor de expressões. Cada
/// frase com matemática começa do zero e é reproduzida sobre o editor
/// como se tivesse sido digitada; comandos de controle ("limpar",
/// "apagar") agem sobre o que está no visor.
#[derive(Debug, Default)]
pub struct CalculadoraVoz {
    calculadora: Calculadora,
}

impl CalculadoraVoz {
    pub fn novo() -> Self {
        CalculadoraVoz {
            calculadora: Calculadora::novo(),
        }
    }

    pub fn calculadora(&self) -> &Calculadora {
        &self.calculadora
    }

    /// Número no visor neste momento.
    pub fn visor(&self) -> String {
        self.calculadora.exibicao_atual()
    }

    /// Processa uma frase falada. Um pedido de resultado fecha a conta
    /// e deixa o valor no visor, pronto para ser operando da próxima.
    pub fn processar_fala(&mut self, frase: &str) -> RespostaVoz {
        let resultado = interprete::processar(frase);
        match resultado.comando {
            TipoComando::Limpar => {
                self.calculadora.limpar();
                return RespostaVoz::Limpa;
            }
            TipoComando::Apagar => {
                self.calculadora.apagar_ultimo();
                return RespostaVoz::Apagada;
            }
            TipoComando::Nenhum => {}
        }
        if resultado.tokens_exibicao.is_empty() {
            return RespostaVoz::NaoReconhecida;
        }

        self.calculadora.limpar();
        self.calculadora.aplicar_tokens(&resultado.tokens_exibicao);
        let expressao = self.calculadora.expressao_completa();
        if resultado.avaliar {
            match self.calculadora.calcular() {
                Ok(valor) => {
                    self.calculadora.limpar();
                    self.calculadora.definir_numero_atual(&valor);
                    RespostaVoz::Calculada {
                        expressao,
                        resultado: valor,
                    }
                }
                Err(erro) => RespostaVoz::Falha { expressao, erro },
            }
        } else {
            let parcial = self.calculadora.avaliar_parcial();
            RespostaVoz::EmAndamento { expressao, parcial }
        }
    }
}
