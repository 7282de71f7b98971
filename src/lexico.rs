// src/lexico.rs
//! Vocabulário reconhecido pelo interpretador de voz: palavras-número,
//! frases-operador (até três palavras) e palavras de enchimento.
//!
//! As chaves são normalizadas na inserção, então a consulta funciona
//! igual para "divisão" e "divisao" sem duplicar entradas.

use std::collections::{HashMap, HashSet};
use std::sync::OnceLock;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::normalizador::normalizar;

/// Quantidade máxima de palavras numa frase-operador ("por cento de").
pub const MAX_PALAVRAS_OPERADOR: usize = 3;

/// Funções matemáticas faladas ou digitadas.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Funcao {
    Raiz,
    Seno,
    Cosseno,
    Tangente,
    Log,
    Ln,
}

impl Funcao {
    /// Abertura na expressão canônica, já com o parêntese de chamada.
    pub fn abre_canonico(&self) -> &'static str {
        match self {
            Funcao::Raiz => "sqrt(",
            Funcao::Seno => "sin(",
            Funcao::Cosseno => "cos(",
            Funcao::Tangente => "tan(",
            Funcao::Log => "log10(",
            Funcao::Ln => "ln(",
        }
    }

    /// Forma mostrada ao usuário.
    pub fn exibicao(&self) -> &'static str {
        match self {
            Funcao::Raiz => "√",
            Funcao::Seno => "sin",
            Funcao::Cosseno => "cos",
            Funcao::Tangente => "tan",
            Funcao::Log => "log",
            Funcao::Ln => "ln",
        }
    }

    /// Mapeia um identificador canônico de volta para a função.
    pub fn do_nome(nome: &str) -> Option<Funcao> {
        match nome {
            "sqrt" => Some(Funcao::Raiz),
            "sin" => Some(Funcao::Seno),
            "cos" => Some(Funcao::Cosseno),
            "tan" => Some(Funcao::Tangente),
            "log" | "log10" => Some(Funcao::Log),
            "ln" => Some(Funcao::Ln),
            _ => None,
        }
    }
}

/// Resultado de uma frase-operador reconhecida.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Simbolo {
    Mais,
    Menos,
    Vezes,
    Dividido,
    Porcento,
    Potencia,
    Quadrado,
    Cubo,
    AbreParentese,
    FechaParentese,
    Funcao(Funcao),
    Fatorial,
    Igual,
    Limpar,
    Apagar,
}

/// Valor de uma palavra-número e se ela multiplica o que veio antes.
#[derive(Debug, Clone, Copy)]
pub struct EntradaNumero {
    pub valor: Decimal,
    pub escala: bool,
}

/// Frase-operador casada a partir de uma posição da frase.
#[derive(Debug, Clone, Copy)]
pub struct CasamentoOperador {
    pub simbolo: Simbolo,
    pub palavras: usize,
}

pub struct Lexico {
    numeros: HashMap<String, EntradaNumero>,
    operadores: HashMap<String, Simbolo>,
    enchimento: HashSet<String>,
}

impl Lexico {
    fn novo() -> Self {
        let mut lexico = Lexico {
            numeros: HashMap::new(),
            operadores: HashMap::new(),
            enchimento: HashSet::new(),
        };

        lexico.inserir_numero("zero", dec!(0));
        lexico.inserir_numero("um", dec!(1));
        lexico.inserir_numero("uma", dec!(1));
        lexico.inserir_numero("dois", dec!(2));
        lexico.inserir_numero("duas", dec!(2));
        lexico.inserir_numero("três", dec!(3));
        lexico.inserir_numero("quatro", dec!(4));
        lexico.inserir_numero("cinco", dec!(5));
        lexico.inserir_numero("seis", dec!(6));
        lexico.inserir_numero("sete", dec!(7));
        lexico.inserir_numero("oito", dec!(8));
        lexico.inserir_numero("nove", dec!(9));

        lexico.inserir_numero("dez", dec!(10));
        lexico.inserir_numero("onze", dec!(11));
        lexico.inserir_numero("doze", dec!(12));
        lexico.inserir_numero("treze", dec!(13));
        lexico.inserir_numero("quatorze", dec!(14));
        lexico.inserir_numero("catorze", dec!(14));
        lexico.inserir_numero("quinze", dec!(15));
        lexico.inserir_numero("dezesseis", dec!(16));
        lexico.inserir_numero("dezasseis", dec!(16));
        lexico.inserir_numero("dezessete", dec!(17));
        lexico.inserir_numero("dezassete", dec!(17));
        lexico.inserir_numero("dezoito", dec!(18));
        lexico.inserir_numero("dezenove", dec!(19));
        lexico.inserir_numero("dezanove", dec!(19));

        lexico.inserir_numero("vinte", dec!(20));
        lexico.inserir_numero("trinta", dec!(30));
        lexico.inserir_numero("quarenta", dec!(40));
        lexico.inserir_numero("cinquenta", dec!(50));
        lexico.inserir_numero("sessenta", dec!(60));
        lexico.inserir_numero("setenta", dec!(70));
        lexico.inserir_numero("oitenta", dec!(80));
        lexico.inserir_numero("noventa", dec!(90));

        lexico.inserir_numero("cem", dec!(100));
        lexico.inserir_numero("cento", dec!(100));
        lexico.inserir_numero("duzentos", dec!(200));
        lexico.inserir_numero("duzentas", dec!(200));
        lexico.inserir_numero("trezentos", dec!(300));
        lexico.inserir_numero("trezentas", dec!(300));
        lexico.inserir_numero("quatrocentos", dec!(400));
        lexico.inserir_numero("quatrocentas", dec!(400));
        lexico.inserir_numero("quinhentos", dec!(500));
        lexico.inserir_numero("quinhentas", dec!(500));
        lexico.inserir_numero("seiscentos", dec!(600));
        lexico.inserir_numero("seiscentas", dec!(600));
        lexico.inserir_numero("setecentos", dec!(700));
        lexico.inserir_numero("setecentas", dec!(700));
        lexico.inserir_numero("oitocentos", dec!(800));
        lexico.inserir_numero("oitocentas", dec!(800));
        lexico.inserir_numero("novecentos", dec!(900));
        lexico.inserir_numero("novecentas", dec!(900));

        lexico.inserir_numero("mil", dec!(1000));
        lexico.inserir_numero("milhão", dec!(1000000));
        lexico.inserir_numero("bilhão", dec!(1000000000));

        lexico.inserir_numero("pi", dec!(3.1415926535));
        lexico.inserir_numero("euler", dec!(2.7182818284));
        lexico.inserir_numero("meia", dec!(0.5));
        lexico.inserir_numero("meio", dec!(0.5));
        lexico.inserir_numero("metade", dec!(0.5));

        lexico.inserir_operador("mais", Simbolo::Mais);
        lexico.inserir_operador("adição", Simbolo::Mais);
        lexico.inserir_operador("adicionar", Simbolo::Mais);
        lexico.inserir_operador("somar", Simbolo::Mais);
        lexico.inserir_operador("soma", Simbolo::Mais);
        lexico.inserir_operador("plus", Simbolo::Mais);
        lexico.inserir_operador("+", Simbolo::Mais);

        lexico.inserir_operador("menos", Simbolo::Menos);
        lexico.inserir_operador("subtração", Simbolo::Menos);
        lexico.inserir_operador("subtrair", Simbolo::Menos);
        lexico.inserir_operador("subtraia", Simbolo::Menos);
        lexico.inserir_operador("subitrai", Simbolo::Menos);
        lexico.inserir_operador("minus", Simbolo::Menos);
        lexico.inserir_operador("-", Simbolo::Menos);
        lexico.inserir_operador("−", Simbolo::Menos);

        lexico.inserir_operador("vezes", Simbolo::Vezes);
        lexico.inserir_operador("multiplicação", Simbolo::Vezes);
        lexico.inserir_operador("multiplicar", Simbolo::Vezes);
        lexico.inserir_operador("multiplique", Simbolo::Vezes);
        lexico.inserir_operador("multiplica", Simbolo::Vezes);
        lexico.inserir_operador("x", Simbolo::Vezes);
        lexico.inserir_operador("*", Simbolo::Vezes);
        lexico.inserir_operador("times", Simbolo::Vezes);
        lexico.inserir_operador("×", Simbolo::Vezes);

        lexico.inserir_operador("dividir", Simbolo::Dividido);
        lexico.inserir_operador("divisão", Simbolo::Dividido);
        lexico.inserir_operador("divida", Simbolo::Dividido);
        lexico.inserir_operador("dividido", Simbolo::Dividido);
        lexico.inserir_operador("dividida", Simbolo::Dividido);
        lexico.inserir_operador("dividido por", Simbolo::Dividido);
        lexico.inserir_operador("dividida por", Simbolo::Dividido);
        lexico.inserir_operador("sobre", Simbolo::Dividido);
        lexico.inserir_operador("divide", Simbolo::Dividido);
        lexico.inserir_operador("slash", Simbolo::Dividido);
        lexico.inserir_operador("barra", Simbolo::Dividido);
        lexico.inserir_operador("/", Simbolo::Dividido);
        lexico.inserir_operador("÷", Simbolo::Dividido);

        lexico.inserir_operador("por cento", Simbolo::Porcento);
        lexico.inserir_operador("por cento de", Simbolo::Porcento);
        lexico.inserir_operador("por cento do", Simbolo::Porcento);
        lexico.inserir_operador("por cento da", Simbolo::Porcento);
        lexico.inserir_operador("por cento dos", Simbolo::Porcento);
        lexico.inserir_operador("por cento das", Simbolo::Porcento);
        lexico.inserir_operador("porcento", Simbolo::Porcento);
        lexico.inserir_operador("porcento de", Simbolo::Porcento);
        lexico.inserir_operador("porcento do", Simbolo::Porcento);
        lexico.inserir_operador("porcento da", Simbolo::Porcento);
        lexico.inserir_operador("porcento dos", Simbolo::Porcento);
        lexico.inserir_operador("porcento das", Simbolo::Porcento);
        lexico.inserir_operador("porcentagem", Simbolo::Porcento);
        lexico.inserir_operador("percentual", Simbolo::Porcento);
        lexico.inserir_operador("percent", Simbolo::Porcento);

        lexico.inserir_operador("abre parênteses", Simbolo::AbreParentese);
        lexico.inserir_operador("abre parêntese", Simbolo::AbreParentese);
        lexico.inserir_operador("fecha parênteses", Simbolo::FechaParentese);
        lexico.inserir_operador("fecha parêntese", Simbolo::FechaParentese);

        lexico.inserir_operador("raiz quadrada", Simbolo::Funcao(Funcao::Raiz));
        lexico.inserir_operador("raiz", Simbolo::Funcao(Funcao::Raiz));
        lexico.inserir_operador("radiciação", Simbolo::Funcao(Funcao::Raiz));
        lexico.inserir_operador("seno", Simbolo::Funcao(Funcao::Seno));
        lexico.inserir_operador("sin", Simbolo::Funcao(Funcao::Seno));
        lexico.inserir_operador("coseno", Simbolo::Funcao(Funcao::Cosseno));
        lexico.inserir_operador("cosseno", Simbolo::Funcao(Funcao::Cosseno));
        lexico.inserir_operador("cos", Simbolo::Funcao(Funcao::Cosseno));
        lexico.inserir_operador("tangente", Simbolo::Funcao(Funcao::Tangente));
        lexico.inserir_operador("tan", Simbolo::Funcao(Funcao::Tangente));
        lexico.inserir_operador("logaritmo", Simbolo::Funcao(Funcao::Log));
        lexico.inserir_operador("log", Simbolo::Funcao(Funcao::Log));
        lexico.inserir_operador("log natural", Simbolo::Funcao(Funcao::Ln));
        lexico.inserir_operador("ln", Simbolo::Funcao(Funcao::Ln));

        lexico.inserir_operador("potência", Simbolo::Potencia);
        lexico.inserir_operador("elevado a", Simbolo::Potencia);
        lexico.inserir_operador("ao quadrado", Simbolo::Quadrado);
        lexico.inserir_operador("ao cubo", Simbolo::Cubo);
        lexico.inserir_operador("fatorial", Simbolo::Fatorial);

        lexico.inserir_operador("igual", Simbolo::Igual);
        lexico.inserir_operador("é igual", Simbolo::Igual);
        lexico.inserir_operador("eh igual", Simbolo::Igual);
        lexico.inserir_operador("resultado", Simbolo::Igual);
        lexico.inserir_operador("calcular", Simbolo::Igual);
        lexico.inserir_operador("calcula", Simbolo::Igual);
        lexico.inserir_operador("calculo", Simbolo::Igual);
        lexico.inserir_operador("enter", Simbolo::Igual);
        lexico.inserir_operador("equals", Simbolo::Igual);

        lexico.inserir_operador("limpar", Simbolo::Limpar);
        lexico.inserir_operador("limpe", Simbolo::Limpar);
        lexico.inserir_operador("limpa", Simbolo::Limpar);
        lexico.inserir_operador("resetar", Simbolo::Limpar);
        lexico.inserir_operador("reset", Simbolo::Limpar);
        lexico.inserir_operador("zerar", Simbolo::Limpar);
        lexico.inserir_operador("zera", Simbolo::Limpar);

        lexico.inserir_operador("apagar", Simbolo::Apagar);
        lexico.inserir_operador("apague", Simbolo::Apagar);
        lexico.inserir_operador("apaga", Simbolo::Apagar);
        lexico.inserir_operador("deletar", Simbolo::Apagar);
        lexico.inserir_operador("delete", Simbolo::Apagar);
        lexico.inserir_operador("remove", Simbolo::Apagar);

        for palavra in [
            "e", "da", "de", "do", "das", "dos", "com", "por", "a", "o", "os", "as", "ao",
            "aos", "uma", "um",
        ] {
            lexico.enchimento.insert(palavra.to_string());
        }

        lexico
    }

    fn inserir_numero(&mut self, palavra: &str, valor: Decimal) {
        let escala = valor.scale() == 0 && valor >= dec!(1000);
        self.numeros
            .insert(normalizar(palavra), EntradaNumero { valor, escala });
    }

    fn inserir_operador(&mut self, frase: &str, simbolo: Simbolo) {
        self.operadores.insert(normalizar(frase), simbolo);
    }

    /// Valor de uma palavra-número já normalizada.
    pub fn numero(&self, palavra: &str) -> Option<EntradaNumero> {
        self.numeros.get(palavra).copied()
    }

    /// Símbolo de uma frase-operador exata.
    pub fn operador_frase(&self, frase: &str) -> Option<Simbolo> {
        self.operadores.get(frase).copied()
    }

    pub fn e_enchimento(&self, palavra: &str) -> bool {
        self.enchimento.contains(palavra)
    }

    /// Palavras que separam a parte inteira da fracionária.
    pub fn e_marcador_decimal(&self, palavra: &str) -> bool {
        matches!(
            normalizar(palavra).as_str(),
            "virgula" | "ponto" | "decimal" | "dot" | "comma"
        )
    }

    /// Busca a frase-operador mais longa começando em `inicio`.
    /// Tenta janelas de três, duas e uma palavra, nessa ordem.
    pub fn procurar_operador(&self, palavras: &[&str], inicio: usize) -> Option<CasamentoOperador> {
        if inicio >= palavras.len() {
            return None;
        }
        let fim_maximo = palavras.len().min(inicio + MAX_PALAVRAS_OPERADOR);
        for fim in (inicio + 1..=fim_maximo).rev() {
            let candidata = normalizar(&palavras[inicio..fim].join(" "));
            if let Some(simbolo) = self.operadores.get(candidata.as_str()) {
                return Some(CasamentoOperador {
                    simbolo: *simbolo,
                    palavras: fim - inicio,
                });
            }
        }
        None
    }

    /// Há uma frase-operador começando exatamente em `inicio`?
    /// Usada pelo compositor para não engolir enchimento que inicia
    /// um operador ("e igual", "por cento").
    pub fn comeca_com_operador(&self, palavras: &[&str], inicio: usize) -> bool {
        self.procurar_operador(palavras, inicio).is_some()
    }
}

static LEXICO: OnceLock<Lexico> = OnceLock::new();

/// Léxico compartilhado do processo. Imutável depois de construído.
pub fn lexico() -> &'static Lexico {
    LEXICO.get_or_init(Lexico::novo)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numero_com_acento_e_sem() {
        let lex = lexico();
        assert_eq!(lex.numero("tres").map(|e| e.valor), Some(dec!(3)));
        assert_eq!(lex.numero("dezesseis").map(|e| e.valor), Some(dec!(16)));
        assert_eq!(lex.numero("milhao").map(|e| e.valor), Some(dec!(1000000)));
        assert!(lex.numero("casa").is_none());
    }

    #[test]
    fn test_escala_marcada_somente_em_milhares() {
        let lex = lexico();
        assert!(lex.numero("mil").map(|e| e.escala) == Some(true));
        assert!(lex.numero("bilhao").map(|e| e.escala) == Some(true));
        assert!(lex.numero("cem").map(|e| e.escala) == Some(false));
        assert!(lex.numero("pi").map(|e| e.escala) == Some(false));
    }

    #[test]
    fn test_operador_mais_longo_vence() {
        let lex = lexico();
        let palavras = ["dez", "por", "cento", "de", "cinquenta"];
        let casamento = lex.procurar_operador(&palavras, 1).unwrap();
        assert_eq!(casamento.simbolo, Simbolo::Porcento);
        assert_eq!(casamento.palavras, 3);

        let palavras = ["cem", "dividido", "por", "cinco"];
        let casamento = lex.procurar_operador(&palavras, 1).unwrap();
        assert_eq!(casamento.simbolo, Simbolo::Dividido);
        assert_eq!(casamento.palavras, 2);
    }

    #[test]
    fn test_operador_simbolos_literais() {
        let lex = lexico();
        assert_eq!(lex.operador_frase("x"), Some(Simbolo::Vezes));
        assert_eq!(lex.operador_frase("−"), Some(Simbolo::Menos));
        assert_eq!(lex.operador_frase("/"), Some(Simbolo::Dividido));
    }

    #[test]
    fn test_enchimento_que_inicia_operador() {
        let lex = lexico();
        let palavras = ["dois", "e", "igual"];
        assert!(lex.e_enchimento("e"));
        assert!(lex.comeca_com_operador(&palavras, 1));
        let palavras = ["dois", "e", "mais", "tres"];
        assert!(!lex.comeca_com_operador(&palavras, 1));
    }

    #[test]
    fn test_marcador_decimal() {
        let lex = lexico();
        assert!(lex.e_marcador_decimal("vírgula"));
        assert!(lex.e_marcador_decimal("virgula"));
        assert!(lex.e_marcador_decimal("ponto"));
        assert!(!lex.e_marcador_decimal("cinco"));
    }

    #[test]
    fn test_funcoes_reconhecidas() {
        let lex = lexico();
        assert_eq!(
            lex.operador_frase("seno"),
            Some(Simbolo::Funcao(Funcao::Seno))
        );
        let palavras = ["raiz", "quadrada", "de", "dezesseis"];
        let casamento = lex.procurar_operador(&palavras, 0).unwrap();
        assert_eq!(casamento.simbolo, Simbolo::Funcao(Funcao::Raiz));
        assert_eq!(casamento.palavras, 2);
        assert_eq!(Funcao::do_nome("log10"), Some(Funcao::Log));
        assert_eq!(Funcao::do_nome("sqrt"), Some(Funcao::Raiz));
        assert!(Funcao::do_nome("abc").is_none());
    }
}
