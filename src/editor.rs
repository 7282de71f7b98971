// src/editor.rs
//! Estado do teclado: número em digitação, expressão acumulada e o
//! replay dos tokens de exibição vindos do intérprete de voz.
//!
//! A expressão acumulada guarda a forma de exibição ("5 × ( 3 + 1 )"),
//! com os operandos separados por espaço e vírgula como marcador
//! decimal. A avaliação delega para o avaliador, que aceita essa forma
//! diretamente.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::avaliador::{self, CASAS_DIVISAO};
use crate::erros::ErroAvaliacao;

/// Literais das teclas de constante, com ponto decimal interno.
pub const CONSTANTE_PI: &str = "3.141592653589793";
pub const CONSTANTE_EULER: &str = "2.718281828459045";
pub const CONSTANTE_RADIANO: &str = "0.017453292519943295";

/// Caracteres que contam como operador no fim da expressão.
const OPERADORES_FINAIS: &[char] = &['+', '-', '−', '×', '÷', '%', '^'];

/// Fotografia serializável do editor, para salvar e restaurar a sessão.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EstadoEditor {
    pub expressao: String,
    pub numero_atual: String,
    pub novo_numero: bool,
}

/// Editor de expressões orientado a teclas.
#[derive(Debug, Clone)]
pub struct Calculadora {
    expressao: String,
    numero_atual: String,
    novo_numero: bool,
}

impl Default for Calculadora {
    fn default() -> Self {
        Calculadora::novo()
    }
}

impl Calculadora {
    pub fn novo() -> Self {
        Calculadora {
            expressao: String::new(),
            numero_atual: String::new(),
            novo_numero: true,
        }
    }

    /// Acrescenta um dígito ao número em digitação.
    pub fn digitar(&mut self, digito: char) {
        if self.novo_numero {
            self.numero_atual.clear();
            self.novo_numero = false;
        }
        self.numero_atual.push(digito);
    }

    /// Acrescenta a vírgula decimal uma única vez por número.
    pub fn marcar_decimal(&mut self) {
        if self.novo_numero {
            self.numero_atual = String::from("0");
            self.novo_numero = false;
        }
        if !self.numero_atual.contains(',') {
            self.numero_atual.push(',');
        }
    }

    /// Fecha o número em digitação e emenda o operador. Com o número
    /// vazio, substitui um operador que esteja pendurado no fim da
    /// expressão.
    pub fn operador(&mut self, operador: &str) {
        if !self.numero_atual.is_empty() {
            self.expressao
                .push_str(&format!("{} {} ", self.numero_atual, operador));
            self.numero_atual.clear();
            self.novo_numero = true;
        } else if !self.expressao.is_empty() {
            let mut base = self.expressao.trim().to_string();
            if base.ends_with(OPERADORES_FINAIS) {
                base.pop();
                base.truncate(base.trim_end().len());
            }
            self.expressao = format!("{} {} ", base, operador);
        }
    }

    pub fn parentese(&mut self, parentese: char) {
        if !self.numero_atual.is_empty() {
            let numero = std::mem::take(&mut self.numero_atual);
            self.expressao.push_str(&numero);
            self.expressao.push(' ');
            self.novo_numero = true;
        }
        self.expressao.push(parentese);
        self.expressao.push(' ');
    }

    /// Emenda uma função aplicada a um argumento já conhecido, na forma
    /// "nome ( argumento )". O número em digitação é descartado, porque
    /// normalmente ele é o próprio argumento.
    pub fn funcao(&mut self, nome: &str, argumento: &str) {
        let argumento = argumento.trim();
        if argumento.is_empty() {
            return;
        }
        self.numero_atual.clear();
        self.novo_numero = true;
        self.expressao
            .push_str(&format!("{} ( {} ) ", nome, argumento));
    }

    /// Substitui o número em digitação pelo literal da constante.
    pub fn constante(&mut self, literal: &str) {
        self.numero_atual = literal.replace('.', ",");
        self.novo_numero = false;
    }

    /// Pendura o fatorial no número em digitação ou no fim da
    /// expressão. Sem operando à esquerda, não faz nada.
    pub fn fatorial(&mut self) {
        if !self.numero_atual.is_empty() {
            self.expressao.push_str(&format!("{}! ", self.numero_atual));
            self.numero_atual.clear();
            self.novo_numero = true;
            return;
        }
        let base = self.expressao.trim_end();
        if base.is_empty() || base.ends_with(OPERADORES_FINAIS) || base.ends_with('(') {
            return;
        }
        self.expressao = format!("{}! ", base);
    }

    /// Divide o número em digitação por cem e devolve o resultado
    /// formatado. Entrada não numérica volta como está.
    pub fn porcentagem_atual(&self) -> String {
        if self.numero_atual.is_empty() {
            return self.exibicao_atual();
        }
        match self.numero_atual.replace(',', ".").parse::<Decimal>() {
            Ok(valor) => match valor.checked_div(dec!(100)) {
                Some(quociente) => avaliador::formatar_decimal(quociente.round_dp_with_strategy(
                    CASAS_DIVISAO,
                    RoundingStrategy::MidpointAwayFromZero,
                )),
                None => self.exibicao_atual(),
            },
            Err(_) => self.exibicao_atual(),
        }
    }

    /// Apaga o último dígito do número em digitação.
    pub fn apagar_ultimo(&mut self) {
        if !self.numero_atual.is_empty() && !self.novo_numero {
            self.numero_atual.pop();
        }
    }

    pub fn limpar(&mut self) {
        self.expressao.clear();
        self.numero_atual.clear();
        self.novo_numero = true;
    }

    /// Expressão acumulada seguida do número em digitação.
    pub fn expressao_completa(&self) -> String {
        format!("{}{}", self.expressao, self.numero_atual)
            .trim()
            .to_string()
    }

    /// Número em digitação para o visor; "0" quando não há nada.
    pub fn exibicao_atual(&self) -> String {
        if self.numero_atual.is_empty() {
            return String::from("0");
        }
        self.numero_atual.clone()
    }

    pub fn expressao(&self) -> &str {
        &self.expressao
    }

    pub fn numero_atual_bruto(&self) -> &str {
        &self.numero_atual
    }

    pub fn pronto_para_numero(&self) -> bool {
        self.novo_numero
    }

    /// Há um cálculo que vale a pena mostrar? Exige um operador e um
    /// operando fechando a expressão.
    pub fn tem_expressao_completa(&self) -> bool {
        let completa = self.expressao_completa();
        if completa.is_empty() {
            return false;
        }
        let tem_operador = completa.contains(OPERADORES_FINAIS);
        let termina_em_operando = completa
            .chars()
            .last()
            .map_or(false, |c| c.is_ascii_digit() || c == ')' || c == '!');
        tem_operador && termina_em_operando
    }

    /// Resultado parcial para o visor: operadores pendurados no fim são
    /// ignorados e qualquer falha vira "Erro".
    pub fn avaliar_parcial(&self) -> String {
        let mut completa = self.expressao_completa();
        if completa.is_empty() {
            return String::from("0");
        }
        while completa.trim_end().ends_with(OPERADORES_FINAIS) {
            completa.truncate(completa.trim_end().len());
            completa.pop();
        }
        let completa = completa.trim_end();
        if completa.is_empty() {
            return String::from("0");
        }
        avaliador::avaliar_ou_erro(completa)
    }

    /// Avalia a expressão completa. Vazia vale "0"; um operador
    /// pendurado é erro, diferente de [`Calculadora::avaliar_parcial`].
    pub fn calcular(&self) -> Result<String, ErroAvaliacao> {
        let completa = self.expressao_completa();
        if completa.is_empty() {
            return Ok(String::from("0"));
        }
        avaliador::avaliar_formatado(&completa)
    }

    /// Emenda uma subexpressão pronta entre parênteses, precedida do
    /// operador líder quando houver um.
    pub fn anexar_subexpressao(&mut self, subexpressao: &str) {
        let texto = subexpressao.trim();
        if texto.is_empty() {
            return;
        }
        if !self.numero_atual.is_empty() {
            let numero = std::mem::take(&mut self.numero_atual);
            self.expressao.push_str(&numero);
            self.novo_numero = true;
        }
        let partes: Vec<&str> = texto.split_whitespace().collect();
        let primeiro = partes[0];
        let base = self.expressao.trim().to_string();
        if matches!(primeiro, "+" | "−" | "×" | "÷" | "%") {
            if partes.len() == 1 {
                return;
            }
            let interno = partes[1..].join(" ");
            self.expressao = if base.is_empty() {
                format!("{} ({})", primeiro, interno)
            } else {
                format!("{} {} ({})", base, primeiro, interno)
            };
        } else {
            let interno = partes.join(" ");
            self.expressao = if base.is_empty() {
                format!("({})", interno)
            } else {
                format!("{} ({})", base, interno)
            };
        }
    }

    pub fn definir_expressao(&mut self, expressao: &str) {
        self.expressao = expressao.to_string();
    }

    /// Substitui o número em digitação, por exemplo pelo resultado de
    /// um cálculo que vira operando do próximo.
    pub fn definir_numero_atual(&mut self, numero: &str) {
        self.numero_atual = numero.to_string();
        self.novo_numero = false;
    }

    pub fn estado(&self) -> EstadoEditor {
        EstadoEditor {
            expressao: self.expressao.clone(),
            numero_atual: self.numero_atual.clone(),
            novo_numero: self.novo_numero,
        }
    }

    pub fn restaurar(&mut self, estado: EstadoEditor) {
        self.expressao = estado.expressao;
        self.numero_atual = estado.numero_atual;
        self.novo_numero = estado.novo_numero;
    }

    /// Reproduz os tokens de exibição do intérprete como se cada um
    /// tivesse sido digitado no teclado. Funções consomem o token
    /// seguinte como argumento; tokens desconhecidos são ignorados.
    pub fn aplicar_tokens(&mut self, tokens: &[String]) {
        let mut idx = 0;
        while idx < tokens.len() {
            let token = tokens[idx].as_str();
            idx += 1;
            if token.is_empty() {
                continue;
            }
            if e_token_numerico(token) {
                for c in token.chars() {
                    if c == ',' {
                        self.marcar_decimal();
                    } else if c != '.' {
                        // ponto de agrupamento de milhar não é digitado
                        self.digitar(c);
                    }
                }
                continue;
            }
            match token {
                "(" => {
                    self.parentese('(');
                    continue;
                }
                ")" => {
                    self.parentese(')');
                    continue;
                }
                "+" | "−" | "-" | "×" | "÷" | "^" => {
                    self.operador(token);
                    continue;
                }
                "%" => {
                    let valor = self.porcentagem_atual();
                    self.definir_numero_atual(&valor);
                    continue;
                }
                "!" => {
                    self.fatorial();
                    continue;
                }
                _ => {}
            }
            if token == "π" || token.eq_ignore_ascii_case("pi") {
                self.constante(CONSTANTE_PI);
                continue;
            }
            if token.eq_ignore_ascii_case("e") || token.eq_ignore_ascii_case("euler") {
                self.constante(CONSTANTE_EULER);
                continue;
            }
            if token.eq_ignore_ascii_case("rad") || token.eq_ignore_ascii_case("radiano") {
                self.constante(CONSTANTE_RADIANO);
                continue;
            }
            if matches!(token, "√" | "sin" | "cos" | "tan" | "log" | "ln") {
                if let Some(argumento) = tokens.get(idx) {
                    idx += 1;
                    if !argumento.is_empty() {
                        self.funcao(token, argumento);
                    }
                }
            }
        }
    }
}

/// Token de número na forma de exibição: dígitos, agrupamento de milhar
/// opcional e uma vírgula decimal opcional.
fn e_token_numerico(token: &str) -> bool {
    let (inteira, decimal) = match token.split_once(',') {
        Some((a, b)) => (a, Some(b)),
        None => (token, None),
    };
    if inteira.is_empty() {
        return false;
    }
    let inteira_ok = if inteira.contains('.') {
        let mut grupos = inteira.split('.');
        match grupos.next() {
            Some(primeiro)
                if !primeiro.is_empty()
                    && primeiro.len() <= 3
                    && primeiro.chars().all(|c| c.is_ascii_digit()) =>
            {
                grupos.all(|g| g.len() == 3 && g.chars().all(|c| c.is_ascii_digit()))
            }
            _ => false,
        }
    } else {
        inteira.chars().all(|c| c.is_ascii_digit())
    };
    let decimal_ok = match decimal {
        Some(d) => !d.is_empty() && d.chars().all(|c| c.is_ascii_digit()),
        None => true,
    };
    inteira_ok && decimal_ok
}
