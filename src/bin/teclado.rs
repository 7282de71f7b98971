use std::io::{self, BufRead, Write};

use calculadora_voz::editor::{Calculadora, CONSTANTE_EULER, CONSTANTE_PI, CONSTANTE_RADIANO};
use calculadora_voz::{descrever_token, formatar_numero_exibicao};

//cargo run --bin teclado
//echo "5 + 3 =" | cargo run --bin teclado

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("--- Calculadora de Teclado ---");
    println!("Teclas: dígitos, vírgula, + - * / ^ % ( ) ! = C DEL");
    println!("Funções: sqrt sin cos tan log ln | Constantes: pi e rad");
    println!("Digite \"sair\" para encerrar.");

    let mut calculadora = Calculadora::novo();
    let stdin = io::stdin();

    print!("> ");
    io::stdout().flush()?;
    for linha in stdin.lock().lines() {
        let linha = linha?;
        let mut encerrar = false;
        for tecla in linha.split_whitespace() {
            if tecla == "sair" || tecla == "q" {
                encerrar = true;
                break;
            }
            apertar(&mut calculadora, tecla);
        }
        if encerrar {
            break;
        }
        print!("> ");
        io::stdout().flush()?;
    }

    println!("--- Sessão encerrada ---");
    Ok(())
}

fn apertar(calculadora: &mut Calculadora, tecla: &str) {
    match tecla {
        "=" => {
            let expressao = calculadora.expressao_completa();
            match calculadora.calcular() {
                Ok(resultado) => {
                    if expressao.is_empty() {
                        println!("= {}", formatar_numero_exibicao(&resultado));
                    } else {
                        println!("{} = {}", expressao, formatar_numero_exibicao(&resultado));
                    }
                    // o resultado fica no visor como operando da próxima conta
                    calculadora.limpar();
                    calculadora.definir_numero_atual(&resultado);
                }
                Err(erro) => println!("Erro: {}", erro),
            }
            return;
        }
        "C" | "c" => calculadora.limpar(),
        "DEL" | "del" => calculadora.apagar_ultimo(),
        "," | "." => calculadora.marcar_decimal(),
        "+" => calculadora.operador("+"),
        "-" | "−" => calculadora.operador("−"),
        "*" | "×" => calculadora.operador("×"),
        "/" | "÷" => calculadora.operador("÷"),
        "^" => calculadora.operador("^"),
        "%" => {
            let valor = calculadora.porcentagem_atual();
            calculadora.definir_numero_atual(&valor);
        }
        "(" => calculadora.parentese('('),
        ")" => calculadora.parentese(')'),
        "!" => calculadora.fatorial(),
        "sqrt" | "√" | "raiz" => aplicar_funcao(calculadora, "√"),
        "sin" | "cos" | "tan" | "log" | "ln" => aplicar_funcao(calculadora, tecla),
        "pi" | "π" => calculadora.constante(CONSTANTE_PI),
        "e" => calculadora.constante(CONSTANTE_EULER),
        "rad" => calculadora.constante(CONSTANTE_RADIANO),
        _ if tecla.chars().all(|c| c.is_ascii_digit() || c == ',') => {
            for c in tecla.chars() {
                if c == ',' {
                    calculadora.marcar_decimal();
                } else {
                    calculadora.digitar(c);
                }
            }
        }
        _ => {
            println!("tecla desconhecida: {}", tecla);
            return;
        }
    }
    mostrar(calculadora, tecla);
}

/// As teclas de função aplicam-se ao número do visor, como os botões
/// sin/cos/tan da calculadora de tela.
fn aplicar_funcao(calculadora: &mut Calculadora, nome: &str) {
    let argumento = calculadora.exibicao_atual();
    calculadora.funcao(nome, &argumento);
}

fn mostrar(calculadora: &Calculadora, tecla: &str) {
    let expressao = calculadora.expressao_completa();
    let parcial = formatar_numero_exibicao(&calculadora.avaliar_parcial());
    if expressao.is_empty() {
        println!("[{}] visor: {}", descrever_token(tecla), parcial);
    } else {
        println!("[{}] {} | visor: {}", descrever_token(tecla), expressao, parcial);
    }
}
