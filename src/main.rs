use std::env;
use std::io::{self, BufRead};

use calculadora_voz::interprete::{self, TipoComando};
use calculadora_voz::{avaliar_formatado, escolher_melhor_hipotese, formatar_numero_exibicao};

//cargo run --bin calculadora-voz -- "cinco mais três igual"
//cargo run --bin calculadora-voz -- --detalhe "raiz quadrada de dezesseis"
//echo "mil dividido por dois igual" | cargo run --bin calculadora-voz

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    let mut detalhe = false;
    let mut melhor = false;
    let mut frases: Vec<String> = Vec::new();

    for arg in &args[1..] {
        match arg.as_str() {
            "--detalhe" => detalhe = true,
            "--melhor" => melhor = true,
            "--ajuda" | "-h" => {
                imprimir_uso(&args[0]);
                return Ok(());
            }
            _ => frases.push(arg.clone()),
        }
    }

    // Sem frases na linha de comando, cada linha da entrada padrão é uma frase.
    if frases.is_empty() {
        let stdin = io::stdin();
        for linha in stdin.lock().lines() {
            let linha = linha?;
            if linha.trim().is_empty() {
                continue;
            }
            frases.push(linha);
        }
    }

    if frases.is_empty() {
        imprimir_uso(&args[0]);
        return Err("Nenhuma frase para interpretar".into());
    }

    if melhor {
        // As frases competem como hipóteses do reconhecedor; só a melhor é interpretada.
        match escolher_melhor_hipotese(&frases) {
            Some(escolhida) => {
                println!("hipótese: {}", escolhida);
                interpretar_frase(&escolhida, detalhe);
            }
            None => return Err("Nenhuma hipótese aproveitável".into()),
        }
        return Ok(());
    }

    for frase in &frases {
        interpretar_frase(frase, detalhe);
    }
    Ok(())
}

fn interpretar_frase(frase: &str, detalhe: bool) {
    let limpa = calculadora_voz::normalizar_frase_matematica(frase);
    let resultado = interprete::processar(&limpa);

    match resultado.comando {
        TipoComando::Limpar => {
            println!("[comando] limpar");
            return;
        }
        TipoComando::Apagar => {
            println!("[comando] apagar");
            return;
        }
        TipoComando::Nenhum => {}
    }

    if resultado.tokens_exibicao.is_empty() {
        println!("{}", interprete::para_forma_legivel(""));
        return;
    }

    let exibicao = resultado.expressao_exibicao();
    if resultado.avaliar {
        println!("{} =", exibicao);
    } else {
        println!("{}", exibicao);
    }

    if detalhe {
        println!("  tokens: {:?}", resultado.tokens_exibicao);
        println!("  canônica: {}", resultado.expressao_canonica);
    }

    if resultado.avaliar {
        match avaliar_formatado(&resultado.expressao_canonica) {
            Ok(valor) => println!("= {}", formatar_numero_exibicao(&valor)),
            Err(erro) => println!("Erro: {}", erro),
        }
    }
}

fn imprimir_uso(programa: &str) {
    eprintln!("Uso: {} [--detalhe] [--melhor] \"frase falada\" ...", programa);
    eprintln!("Sem frases nos argumentos, lê uma frase por linha da entrada padrão.");
    eprintln!("  --detalhe   mostra os tokens e a expressão canônica");
    eprintln!("  --melhor    trata as frases como hipóteses e interpreta a melhor");
}
