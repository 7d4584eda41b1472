//! REST バックエンドを使う RecordStore 実装（reqwest blocking）
//!
//! - GET    {base}/{resource}?page=n     一覧（ページ envelope、最終ページまで読む）
//! - POST   {base}/{resource}/cadastro   新規作成
//! - PUT    {base}/{resource}            更新（本文に id）
//! - DELETE {base}/{resource}/{id}       論理削除

use reqwest::blocking::{Client, RequestBuilder};
use serde_json::Value;
use std::marker::PhantomData;
use std::time::Duration;

use super::wire::{Listing, WireRecord};
use crate::domain::{BaseUrl, RecordId};
use crate::error::Error;
use crate::ports::outbound::RecordStore;

pub struct HttpRecordStore<R: WireRecord> {
    client: Client,
    base: BaseUrl,
    _record: PhantomData<fn() -> R>,
}

impl<R: WireRecord> HttpRecordStore<R> {
    pub fn new(base: BaseUrl, timeout: Duration) -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| Error::http(format!("Failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base,
            _record: PhantomData,
        })
    }

    fn url(&self, extra: &[&str]) -> String {
        let mut segments = vec![R::KIND.resource()];
        segments.extend_from_slice(extra);
        self.base.join(&segments)
    }

    /// 送信して本文を返す。非 2xx はバックエンドのメッセージ付きでエラーにする。
    fn send(&self, request: RequestBuilder) -> Result<String, Error> {
        let response = request
            .send()
            .map_err(|e| Error::http(format!("HTTP request failed: {}", e)))?;
        let status = response.status();
        let text = response
            .text()
            .map_err(|e| Error::http(format!("Failed to read response: {}", e)))?;
        if !status.is_success() {
            return Err(Error::http(error_message(status.as_u16(), &text)));
        }
        Ok(text)
    }

    fn parse_record(text: &str) -> Result<R, Error> {
        let wire: R::Wire = serde_json::from_str(text)
            .map_err(|e| Error::json(format!("Failed to parse response JSON: {}", e)))?;
        Ok(R::from_wire(wire))
    }
}

/// エラー応答から利用者向けメッセージを取り出す
fn error_message(status: u16, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| {
            ["message", "error"]
                .iter()
                .find_map(|k| v[*k].as_str().map(str::to_string))
        })
        .map(|msg| format!("{} {}", status, msg))
        .unwrap_or_else(|| format!("{}: {}", status, body.trim()))
}

impl<R: WireRecord> RecordStore<R> for HttpRecordStore<R> {
    fn snapshot(&self) -> Result<Vec<R>, Error> {
        let mut records = Vec::new();
        let mut page: u64 = 0;
        loop {
            let mut request = self.client.get(self.url(&[]));
            if page > 0 {
                request = request.query(&[("page", page)]);
            }
            let text = self.send(request)?;
            let listing: Listing<R::Wire> = serde_json::from_str(&text)
                .map_err(|e| Error::json(format!("Failed to parse listing JSON: {}", e)))?;
            let more = listing.has_next(page);
            records.extend(listing.into_items().into_iter().map(R::from_wire));
            if !more {
                return Ok(records);
            }
            page += 1;
        }
    }

    fn save(&self, record: R) -> Result<R, Error> {
        let wire = record.to_wire()?;
        match record.id() {
            None => {
                let text = self.send(self.client.post(self.url(&["cadastro"])).json(&wire))?;
                if text.trim().is_empty() {
                    return Err(Error::http("Empty response to create request".to_string()));
                }
                Self::parse_record(&text)
            }
            Some(_) => {
                let text = self.send(self.client.put(self.url(&[])).json(&wire))?;
                if text.trim().is_empty() {
                    return Ok(record);
                }
                Self::parse_record(&text)
            }
        }
    }

    fn deactivate(&self, id: RecordId) -> Result<(), Error> {
        let id = id.to_string();
        self.send(self.client.delete(self.url(&[&id])))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Medico, Paciente, Record};
    use std::io::{BufRead, BufReader, Read, Write};
    use std::net::TcpListener;
    use std::thread::JoinHandle;

    /// 応答を順に返すサーバ。受け取ったリクエスト（先頭行 + 本文）を順に返す。
    fn serve(responses: &[(&str, &str)]) -> (BaseUrl, JoinHandle<Vec<(String, String)>>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        let responses: Vec<(String, String)> = responses
            .iter()
            .map(|(status, body)| (status.to_string(), body.to_string()))
            .collect();
        let handle = std::thread::spawn(move || {
            let mut seen = Vec::new();
            for (status, body) in responses {
                let (stream, _) = listener.accept().unwrap();
                let mut reader = BufReader::new(stream);
                let mut request_line = String::new();
                reader.read_line(&mut request_line).unwrap();
                let mut content_length = 0usize;
                loop {
                    let mut line = String::new();
                    reader.read_line(&mut line).unwrap();
                    if line == "\r\n" || line.is_empty() {
                        break;
                    }
                    let lower = line.to_ascii_lowercase();
                    if let Some(v) = lower.strip_prefix("content-length:") {
                        content_length = v.trim().parse().unwrap();
                    }
                }
                let mut req_body = vec![0u8; content_length];
                reader.read_exact(&mut req_body).unwrap();
                let response = format!(
                    "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                reader.get_mut().write_all(response.as_bytes()).unwrap();
                seen.push((
                    request_line.trim_end().to_string(),
                    String::from_utf8(req_body).unwrap(),
                ));
            }
            seen
        });
        (BaseUrl::new(format!("http://{}", addr)), handle)
    }

    /// 1 リクエストだけ応答するサーバ
    fn serve_once(status: &str, body: &str) -> (BaseUrl, JoinHandle<(String, String)>) {
        let (base, server) = serve(&[(status, body)]);
        let handle = std::thread::spawn(move || server.join().unwrap().remove(0));
        (base, handle)
    }

    fn store<R: WireRecord>(base: BaseUrl) -> HttpRecordStore<R> {
        HttpRecordStore::new(base, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn test_snapshot_reads_page_content() {
        let (base, server) = serve_once(
            "200 OK",
            r#"{"content":[{"id":5,"nome":"Ana","email":"a@x","telefone":"1","cpf":"111",
                "endereco":{"logradouro":"R","numero":"1","bairro":"B","cidade":"C","uf":"MG","cep":"0"}}],
               "totalElements":1}"#,
        );
        let items = store::<Paciente>(base).snapshot().unwrap();
        let (request_line, _) = server.join().unwrap();
        assert_eq!(request_line, "GET /pacientes HTTP/1.1");
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id, Some(RecordId::new(5)));
        assert_eq!(items[0].logradouro, "R");
        assert!(items[0].ativo);
    }

    #[test]
    fn test_snapshot_follows_pages_until_last() {
        let (base, server) = serve(&[
            (
                "200 OK",
                r#"{"content":[{"id":1,"nome":"Ana","cpf":"1"}],"last":false,"totalPages":2,"totalElements":2}"#,
            ),
            (
                "200 OK",
                r#"{"content":[{"id":2,"nome":"Bia","cpf":"2"}],"last":true,"totalPages":2,"totalElements":2}"#,
            ),
        ]);
        let s = store::<Paciente>(base);
        let items = s.snapshot().unwrap();
        let requests = server.join().unwrap();
        assert_eq!(requests[0].0, "GET /pacientes HTTP/1.1");
        assert_eq!(requests[1].0, "GET /pacientes?page=1 HTTP/1.1");
        let ids: Vec<Option<RecordId>> = items.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![Some(RecordId::new(1)), Some(RecordId::new(2))]);
    }

    #[test]
    fn test_find_reaches_records_past_first_page() {
        let (base, server) = serve(&[
            ("200 OK", r#"{"content":[{"id":1,"nome":"Ana"}],"totalPages":2}"#),
            ("200 OK", r#"{"content":[{"id":12,"nome":"Caio"}],"totalPages":2}"#),
        ]);
        let found = store::<Medico>(base).find(RecordId::new(12)).unwrap();
        server.join().unwrap();
        assert_eq!(found.nome, "Caio");
    }

    #[test]
    fn test_create_posts_nested_payload() {
        let (base, server) = serve_once(
            "201 Created",
            r#"{"id":9,"nome":"Ana","email":"a@x","telefone":"1","crm":"9/MG","especialidade":"PEDIATRIA",
                "endereco":{"logradouro":"R","numero":"1","bairro":"B","cidade":"C","uf":"MG","cep":"0"}}"#,
        );
        let mut m = Medico::blank();
        m.nome = "Ana".to_string();
        m.especialidade = "Pediatria".to_string();
        m.logradouro = "R".to_string();
        let saved = store::<Medico>(base).save(m).unwrap();
        let (request_line, body) = server.join().unwrap();
        assert_eq!(request_line, "POST /medicos/cadastro HTTP/1.1");
        let sent: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["especialidade"], "PEDIATRIA");
        assert_eq!(sent["endereco"]["logradouro"], "R");
        assert!(sent.get("id").is_none());
        assert_eq!(saved.id, Some(RecordId::new(9)));
        assert_eq!(saved.especialidade, "Pediatria");
    }

    #[test]
    fn test_update_puts_with_id_and_tolerates_empty_body() {
        let (base, server) = serve_once("200 OK", "");
        let mut p = Paciente::blank();
        p.id = Some(RecordId::new(3));
        p.nome = "Zeca".to_string();
        let saved = store::<Paciente>(base).save(p.clone()).unwrap();
        let (request_line, body) = server.join().unwrap();
        assert_eq!(request_line, "PUT /pacientes HTTP/1.1");
        let sent: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(sent["id"], 3);
        assert_eq!(saved, p);
    }

    #[test]
    fn test_deactivate_sends_delete() {
        let (base, server) = serve_once("204 No Content", "");
        store::<Medico>(base).deactivate(RecordId::new(4)).unwrap();
        let (request_line, _) = server.join().unwrap();
        assert_eq!(request_line, "DELETE /medicos/4 HTTP/1.1");
    }

    #[test]
    fn test_error_status_carries_backend_message() {
        let (base, server) = serve_once("400 Bad Request", r#"{"message":"CRM duplicado"}"#);
        let mut m = Medico::blank();
        m.nome = "Ana".to_string();
        let err = store::<Medico>(base).save(m).unwrap_err();
        server.join().unwrap();
        assert_eq!(err, Error::http("400 CRM duplicado"));
    }

    #[test]
    fn test_unknown_especialidade_rejected_before_request() {
        // 接続先が無くても、送信前に弾かれる
        let s = store::<Medico>(BaseUrl::new("http://127.0.0.1:9"));
        let mut m = Medico::blank();
        m.especialidade = "Cardiologista".to_string();
        assert!(s.save(m).unwrap_err().is_usage());
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(500, r#"{"error":"Internal"}"#), "500 Internal");
        assert_eq!(error_message(502, "bad gateway\n"), "502: bad gateway");
    }
}
