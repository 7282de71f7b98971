// src/construtor.rs
//! Acumulador de expressão em duas trilhas sincronizadas: os tokens de
//! exibição (o que o usuário vê: "5 × ( 3 + 1 )") e os tokens canônicos
//! (o que o avaliador lê: "5*(3+1)").
//!
//! As regras de boa-formação moram aqui: multiplicação implícita,
//! colapso de operadores consecutivos, sinal de menos no início,
//! porcentagem só depois de valor, e o fechamento de escopos abertos
//! no fim da frase.

use crate::lexico::Funcao;

/// Categoria do último token acumulado, usada pelas regras de encadeamento.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipoToken {
    Nenhum,
    Numero,
    Operador,
    Funcao,
    AbreParentese,
    FechaParentese,
    Porcentagem,
    Fatorial,
    Constante,
}

/// Escopo aberto ainda não fechado. Um parêntese dito pelo usuário e o
/// parêntese de chamada de uma função fecham de formas diferentes: o
/// manual aparece na exibição, o de função não.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Escopo {
    ParenteseManual,
    EscopoFuncao,
}

#[derive(Debug, Default)]
pub struct ConstrutorExpressao {
    tokens_canonicos: Vec<String>,
    tipos: Vec<TipoToken>,
    tokens_exibicao: Vec<String>,
    escopos: Vec<Escopo>,
}

impl ConstrutorExpressao {
    pub fn novo() -> Self {
        ConstrutorExpressao::default()
    }

    pub fn esta_vazio(&self) -> bool {
        self.tokens_canonicos.is_empty()
    }

    pub fn ultimo_tipo(&self) -> TipoToken {
        self.tipos.last().copied().unwrap_or(TipoToken::Nenhum)
    }

    /// Tokens na forma de exibição, na ordem em que foram ditos.
    pub fn tokens_exibicao(&self) -> &[String] {
        &self.tokens_exibicao
    }

    /// Expressão canônica pronta para o avaliador.
    pub fn expressao_canonica(&self) -> String {
        self.tokens_canonicos.concat()
    }

    pub fn adicionar_numero(&mut self, exibicao: &str, canonico: &str) {
        self.multiplicacao_implicita();
        self.empurrar(canonico, TipoToken::Numero, Some(exibicao));
    }

    pub fn adicionar_constante(&mut self, exibicao: &str, canonico: &str) {
        self.multiplicacao_implicita();
        self.empurrar(canonico, TipoToken::Constante, Some(exibicao));
    }

    /// Operador binário. No início da expressão só o menos sobrevive,
    /// virando sinal ("menos cinco" acumula "0 − 5"). Dois operadores
    /// seguidos colapsam: o último dito substitui o anterior.
    pub fn adicionar_operador(&mut self, canonico: &str, exibicao: &str) {
        if self.tokens_canonicos.is_empty() {
            if canonico == "-" {
                self.adicionar_numero("0", "0");
            } else {
                return;
            }
        }
        if self.ultimo_tipo() == TipoToken::Operador {
            self.remover_ultimo();
        }
        self.empurrar(canonico, TipoToken::Operador, Some(exibicao));
    }

    /// Açúcar de potência ("ao quadrado", "ao cubo"): vira `^` seguido do
    /// expoente. Sem base acumulada não há o que elevar.
    pub fn adicionar_potencia(&mut self, expoente: &str) {
        if self.tokens_canonicos.is_empty() {
            return;
        }
        self.adicionar_operador("^", "^");
        self.empurrar(expoente, TipoToken::Numero, Some(expoente));
    }

    /// Porcentagem pós-fixada: só gruda em número, parêntese fechado ou
    /// constante. Canonicamente vira "*0.01".
    pub fn adicionar_porcentagem(&mut self) {
        if self.tokens_canonicos.is_empty() {
            return;
        }
        if !matches!(
            self.ultimo_tipo(),
            TipoToken::Numero | TipoToken::FechaParentese | TipoToken::Constante
        ) {
            return;
        }
        self.empurrar("*0.01", TipoToken::Porcentagem, Some("%"));
    }

    /// Fatorial pós-fixado. Devolve `false` quando não há operando antes,
    /// deixando quem chama tentar a ordem "fatorial de cinco".
    pub fn adicionar_fatorial(&mut self) -> bool {
        if self.tokens_canonicos.is_empty() {
            return false;
        }
        self.empurrar("!", TipoToken::Fatorial, Some("!"));
        true
    }

    pub fn adicionar_funcao(&mut self, funcao: Funcao) {
        self.multiplicacao_implicita();
        self.empurrar(funcao.abre_canonico(), TipoToken::Funcao, Some(funcao.exibicao()));
        self.escopos.push(Escopo::EscopoFuncao);
    }

    pub fn abrir_parentese(&mut self) {
        self.multiplicacao_implicita();
        self.empurrar("(", TipoToken::AbreParentese, Some("("));
        self.escopos.push(Escopo::ParenteseManual);
    }

    /// Fecha o escopo pendente. Parêntese dito pelo usuário tem
    /// preferência sobre o parêntese de chamada de função.
    pub fn fechar_parentese(&mut self) {
        if let Some(posicao) = self
            .escopos
            .iter()
            .rposition(|escopo| *escopo == Escopo::ParenteseManual)
        {
            self.escopos.remove(posicao);
            self.empurrar(")", TipoToken::FechaParentese, Some(")"));
            return;
        }
        self.fechar_funcao();
    }

    /// Fecha o escopo de função mais interno. O ")" entra só na trilha
    /// canônica; a exibição mostra a função sem parênteses.
    fn fechar_funcao(&mut self) {
        if let Some(posicao) = self
            .escopos
            .iter()
            .rposition(|escopo| *escopo == Escopo::EscopoFuncao)
        {
            self.escopos.remove(posicao);
            self.empurrar(")", TipoToken::FechaParentese, None);
        }
    }

    /// Arremate no fim da frase: apara operador ou função pendurados no
    /// final e fecha os escopos que ficaram abertos. Depois disso a
    /// expressão ou está avaliável ou está vazia.
    pub fn fechar_tudo(&mut self) {
        self.aparar_final();
        while !self.escopos.is_empty() {
            self.fechar_parentese();
        }
    }

    fn aparar_final(&mut self) {
        loop {
            match self.ultimo_tipo() {
                TipoToken::Operador => {
                    self.remover_ultimo();
                }
                TipoToken::Funcao => {
                    self.remover_ultimo();
                    if let Some(posicao) = self
                        .escopos
                        .iter()
                        .rposition(|escopo| *escopo == Escopo::EscopoFuncao)
                    {
                        self.escopos.remove(posicao);
                    }
                }
                _ => break,
            }
        }
    }

    fn multiplicacao_implicita(&mut self) {
        if self.tokens_canonicos.is_empty() {
            return;
        }
        if matches!(
            self.ultimo_tipo(),
            TipoToken::Numero
                | TipoToken::FechaParentese
                | TipoToken::Porcentagem
                | TipoToken::Fatorial
                | TipoToken::Constante
        ) {
            self.empurrar("*", TipoToken::Operador, Some("×"));
        }
    }

    fn empurrar(&mut self, canonico: &str, tipo: TipoToken, exibicao: Option<&str>) {
        self.tokens_canonicos.push(canonico.to_string());
        self.tipos.push(tipo);
        if let Some(texto) = exibicao {
            self.tokens_exibicao.push(texto.to_string());
        }
    }

    fn remover_ultimo(&mut self) {
        self.tokens_canonicos.pop();
        self.tipos.pop();
        // as trilhas andam emparelhadas no fim da lista; só o ")" de
        // função fica fora da exibição, e esse nunca é removido
        self.tokens_exibicao.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exibicao(construtor: &ConstrutorExpressao) -> String {
        construtor.tokens_exibicao().join(" ")
    }

    #[test]
    fn test_numero_simples() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("5", "5");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5");
        assert_eq!(exibicao(&construtor), "5");
    }

    #[test]
    fn test_multiplicacao_implicita_antes_de_numero() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("2", "2");
        construtor.adicionar_numero("3", "3");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "2*3");
        assert_eq!(exibicao(&construtor), "2 × 3");
    }

    #[test]
    fn test_multiplicacao_implicita_antes_de_parentese_e_funcao() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("2", "2");
        construtor.abrir_parentese();
        construtor.adicionar_numero("3", "3");
        construtor.fechar_parentese();
        construtor.adicionar_funcao(Funcao::Raiz);
        construtor.adicionar_numero("4", "4");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "2*(3)*sqrt(4)");
        assert_eq!(exibicao(&construtor), "2 × ( 3 ) × √ 4");
    }

    #[test]
    fn test_operadores_consecutivos_colapsam() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("5", "5");
        construtor.adicionar_operador("+", "+");
        construtor.adicionar_operador("*", "×");
        construtor.adicionar_numero("3", "3");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5*3");
        assert_eq!(exibicao(&construtor), "5 × 3");
    }

    #[test]
    fn test_menos_no_inicio_vira_sinal() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_operador("-", "−");
        construtor.adicionar_numero("5", "5");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "0-5");
        assert_eq!(exibicao(&construtor), "0 − 5");
    }

    #[test]
    fn test_outro_operador_no_inicio_e_descartado() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_operador("+", "+");
        construtor.adicionar_numero("5", "5");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5");
    }

    #[test]
    fn test_porcentagem_exige_valor_antes() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_porcentagem();
        assert!(construtor.esta_vazio());

        construtor.adicionar_numero("20", "20");
        construtor.adicionar_operador("+", "+");
        construtor.adicionar_porcentagem();
        construtor.adicionar_numero("5", "5");
        construtor.fechar_tudo();
        // depois de operador a porcentagem é ignorada
        assert_eq!(construtor.expressao_canonica(), "20+5");
    }

    #[test]
    fn test_porcentagem_depois_de_numero() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("20", "20");
        construtor.adicionar_porcentagem();
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "20*0.01");
        assert_eq!(exibicao(&construtor), "20 %");
    }

    #[test]
    fn test_fatorial_sem_operando() {
        let mut construtor = ConstrutorExpressao::novo();
        assert!(!construtor.adicionar_fatorial());
        construtor.adicionar_numero("5", "5");
        assert!(construtor.adicionar_fatorial());
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5!");
        assert_eq!(exibicao(&construtor), "5 !");
    }

    #[test]
    fn test_potencia_com_acucar() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("5", "5");
        construtor.adicionar_potencia("2");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5^2");
        assert_eq!(exibicao(&construtor), "5 ^ 2");
    }

    #[test]
    fn test_potencia_sem_base_nao_faz_nada() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_potencia("2");
        construtor.fechar_tudo();
        assert!(construtor.esta_vazio());
        assert_eq!(construtor.expressao_canonica(), "");
    }

    #[test]
    fn test_funcao_fecha_no_fim_da_frase() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_funcao(Funcao::Raiz);
        construtor.adicionar_numero("16", "16");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "sqrt(16)");
        // o parêntese da função não aparece na exibição
        assert_eq!(exibicao(&construtor), "√ 16");
    }

    #[test]
    fn test_parentese_manual_fecha_antes_de_funcao() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.abrir_parentese();
        construtor.adicionar_funcao(Funcao::Seno);
        construtor.adicionar_numero("9", "9");
        construtor.fechar_parentese();
        construtor.adicionar_operador("+", "+");
        construtor.adicionar_numero("1", "1");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "(sin(9)+1)");
        assert_eq!(exibicao(&construtor), "( sin 9 ) + 1");
    }

    #[test]
    fn test_operador_pendurado_e_aparado() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("5", "5");
        construtor.adicionar_operador("+", "+");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5");
        assert_eq!(exibicao(&construtor), "5");
    }

    #[test]
    fn test_funcao_pendurada_e_aparada() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_numero("5", "5");
        construtor.adicionar_operador("+", "+");
        construtor.adicionar_funcao(Funcao::Seno);
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "5");
        assert_eq!(exibicao(&construtor), "5");
    }

    #[test]
    fn test_operador_dentro_de_parentese_aberto() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.abrir_parentese();
        construtor.adicionar_numero("5", "5");
        construtor.adicionar_operador("+", "+");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "(5)");
        assert_eq!(exibicao(&construtor), "( 5 )");
    }

    #[test]
    fn test_constante_participa_da_multiplicacao_implicita() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_constante("π", "3.141592653589793");
        construtor.adicionar_numero("2", "2");
        construtor.fechar_tudo();
        assert_eq!(construtor.expressao_canonica(), "3.141592653589793*2");
        assert_eq!(exibicao(&construtor), "π × 2");
    }

    #[test]
    fn test_so_funcao_resulta_vazio() {
        let mut construtor = ConstrutorExpressao::novo();
        construtor.adicionar_funcao(Funcao::Seno);
        construtor.fechar_tudo();
        assert!(construtor.esta_vazio());
        assert_eq!(exibicao(&construtor), "");
    }
}
