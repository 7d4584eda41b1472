//! モック用の初期データ（メモリストアの初期状態）

use super::medico::Medico;
use super::paciente::Paciente;
use super::record::RecordId;

#[allow(clippy::too_many_arguments)]
fn medico(
    id: i64,
    nome: &str,
    especialidade: &str,
    crm: &str,
    email: &str,
    telefone: &str,
    endereco: [&str; 7],
) -> Medico {
    let [logradouro, numero, complemento, bairro, cidade, uf, cep] = endereco;
    Medico {
        id: Some(RecordId::new(id)),
        nome: nome.to_string(),
        especialidade: especialidade.to_string(),
        crm: crm.to_string(),
        email: email.to_string(),
        telefone: telefone.to_string(),
        logradouro: logradouro.to_string(),
        numero: numero.to_string(),
        complemento: complemento.to_string(),
        bairro: bairro.to_string(),
        cidade: cidade.to_string(),
        uf: uf.to_string(),
        cep: cep.to_string(),
        ativo: true,
    }
}

fn paciente(
    id: i64,
    nome: &str,
    cpf: &str,
    email: &str,
    telefone: &str,
    endereco: [&str; 7],
) -> Paciente {
    let [logradouro, numero, complemento, bairro, cidade, uf, cep] = endereco;
    Paciente {
        id: Some(RecordId::new(id)),
        nome: nome.to_string(),
        cpf: cpf.to_string(),
        email: email.to_string(),
        telefone: telefone.to_string(),
        logradouro: logradouro.to_string(),
        numero: numero.to_string(),
        complemento: complemento.to_string(),
        bairro: bairro.to_string(),
        cidade: cidade.to_string(),
        uf: uf.to_string(),
        cep: cep.to_string(),
        ativo: true,
    }
}

pub fn medicos() -> Vec<Medico> {
    vec![
        medico(
            1,
            "João de Oliveira",
            "Cardiologista",
            "12345/MG",
            "joao@clinica.com",
            "(31) 98765-4321",
            ["Rua A", "100", "", "Centro", "BH", "MG", "30110-001"],
        ),
        medico(
            2,
            "Antônio de Oliveira",
            "Pediatra",
            "23456/MG",
            "antonio@clinica.com",
            "(31) 99876-5432",
            ["Av. B", "200", "Sala 1", "Funcionários", "BH", "MG", "30110-002"],
        ),
        medico(
            3,
            "Maria da Silva",
            "Dermatologista",
            "34567/SP",
            "maria@clinica.com",
            "(11) 97654-3210",
            ["Rua C", "300", "", "Pinheiros", "São Paulo", "SP", "05407-000"],
        ),
    ]
}

pub fn pacientes() -> Vec<Paciente> {
    vec![
        paciente(
            101,
            "Pedro Alves",
            "123.456.789-00",
            "pedro@teste.com",
            "(31) 99111-2222",
            ["Rua X", "50", "", "Savassi", "BH", "MG", "30110-003"],
        ),
        paciente(
            102,
            "Alice Lima",
            "987.654.321-99",
            "alice@teste.com",
            "(11) 99333-4444",
            ["Av. Y", "1500", "Apto 502", "Jardins", "São Paulo", "SP", "01414-000"],
        ),
    ]
}
