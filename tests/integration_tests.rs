//! Frase falada entrando, número formatado saindo: o caminho completo
//! pela biblioteca, do normalizador ao avaliador.

use calculadora_voz::{
    calcular_frase, escolher_melhor_hipotese, processar, processar_comando_voz, Calculadora,
    CalculadoraVoz, ErroAvaliacao, RespostaVoz,
};

#[test]
fn test_frases_basicas() {
    assert_eq!(calcular_frase("cinco mais três"), Ok("8".to_string()));
    assert_eq!(calcular_frase("vinte e um menos dez"), Ok("11".to_string()));
    assert_eq!(calcular_frase("sete vezes oito"), Ok("56".to_string()));
    assert_eq!(calcular_frase("mil dividido por dois"), Ok("500".to_string()));
}

#[test]
fn test_precedencia_na_frase() {
    assert_eq!(
        calcular_frase("dez mais cinco vezes dois"),
        Ok("20".to_string())
    );
    assert_eq!(
        calcular_frase("dez menos quatro dividido por dois"),
        Ok("8".to_string())
    );
}

#[test]
fn test_numerais_compostos() {
    assert_eq!(
        calcular_frase("dois mil trezentos e quarenta e cinco mais zero"),
        Ok("2345".to_string())
    );
    assert_eq!(
        calcular_frase("cento e vinte e três mil dividido por três"),
        Ok("41000".to_string())
    );
    assert_eq!(
        calcular_frase("novecentos e noventa e nove mais um"),
        Ok("1000".to_string())
    );
}

#[test]
fn test_fracoes_decimais_faladas() {
    assert_eq!(
        calcular_frase("dois vírgula cinco vezes dois"),
        Ok("5".to_string())
    );
    assert_eq!(
        calcular_frase("dez vírgula zero cinco mais zero"),
        Ok("10,05".to_string())
    );
    assert_eq!(
        calcular_frase("vírgula cinco mais vírgula cinco"),
        Ok("1".to_string())
    );
}

#[test]
fn test_potencia_e_fatorial() {
    assert_eq!(calcular_frase("cinco ao quadrado"), Ok("25".to_string()));
    assert_eq!(calcular_frase("dois ao cubo"), Ok("8".to_string()));
    assert_eq!(calcular_frase("dois elevado a dez"), Ok("1024".to_string()));
    assert_eq!(calcular_frase("cinco fatorial"), Ok("120".to_string()));
    assert_eq!(calcular_frase("fatorial de cinco"), Ok("120".to_string()));
}

#[test]
fn test_funcoes_faladas() {
    assert_eq!(
        calcular_frase("raiz quadrada de dezesseis"),
        Ok("4".to_string())
    );
    // o escopo da função engole o resto da frase: sqrt(9+1)
    assert_eq!(
        calcular_frase("raiz quadrada de nove mais um"),
        Ok("3,1622776602".to_string())
    );
    assert_eq!(calcular_frase("logaritmo de cem"), Ok("2".to_string()));
}

#[test]
fn test_porcentagem_falada() {
    assert_eq!(
        calcular_frase("dez por cento de cinquenta"),
        Ok("5".to_string())
    );
    assert_eq!(
        calcular_frase("vinte por cento de oitenta"),
        Ok("16".to_string())
    );
    assert_eq!(
        calcular_frase("cinquenta mais dez por cento"),
        Ok("50,1".to_string())
    );
}

#[test]
fn test_parenteses_falados() {
    assert_eq!(
        calcular_frase("abre parênteses dois mais três fecha parênteses vezes quatro"),
        Ok("20".to_string())
    );
}

#[test]
fn test_sinal_e_cortesia() {
    assert_eq!(calcular_frase("menos cinco mais oito"), Ok("3".to_string()));
    assert_eq!(
        calcular_frase("quanto é nove menos três por favor"),
        Ok("6".to_string())
    );
    assert_eq!(
        calcular_frase("me diga quanto é dois vezes três"),
        Ok("6".to_string())
    );
}

#[test]
fn test_erros_de_avaliacao() {
    assert_eq!(
        calcular_frase("cinco dividido por zero"),
        Err(ErroAvaliacao::DivisaoPorZero)
    );
    assert_eq!(
        calcular_frase("tchau"),
        Err(ErroAvaliacao::ExpressaoInvalida)
    );
}

#[test]
fn test_forma_compacta_do_comando() {
    assert_eq!(processar_comando_voz("cinco mais três igual"), "5 + 3 =");
    assert_eq!(processar_comando_voz("cinco mais três"), "5 + 3");
    assert_eq!(processar_comando_voz("limpar"), "CLEAR");
    assert_eq!(processar_comando_voz("apague isso"), "DELETE");
    assert_eq!(processar_comando_voz("blá blá"), "");
}

#[test]
fn test_replay_no_editor() {
    // os tokens de exibição reproduzem a conta no teclado
    let resultado = processar("mil dividido por dois");
    assert_eq!(resultado.tokens_exibicao, vec!["1000", "÷", "2"]);

    let mut calc = Calculadora::novo();
    calc.aplicar_tokens(&resultado.tokens_exibicao);
    assert_eq!(calc.expressao_completa(), "1000 ÷ 2");
    assert_eq!(calc.calcular(), Ok("500".to_string()));
}

#[test]
fn test_escolha_de_hipotese_de_ponta_a_ponta() {
    let hipoteses = vec![
        "sino mais stress".to_string(),
        "cinco mais três igual".to_string(),
    ];
    let escolhida = escolher_melhor_hipotese(&hipoteses);
    assert_eq!(escolhida, Some("cinco mais três igual".to_string()));
    assert_eq!(calcular_frase("cinco mais três igual"), Ok("8".to_string()));
}

#[test]
fn test_conversa_completa() {
    let mut voz = CalculadoraVoz::novo();

    let resposta = voz.processar_fala("quinze dividido por quatro igual");
    assert_eq!(
        resposta,
        RespostaVoz::Calculada {
            expressao: "15 ÷ 4".to_string(),
            resultado: "3,75".to_string(),
        }
    );
    assert_eq!(voz.visor(), "3,75");

    assert_eq!(voz.processar_fala("limpar"), RespostaVoz::Limpa);
    assert_eq!(voz.visor(), "0");
}
