//! 一覧表示用のセクション導出（検索・絞り込み・頭文字グループ化）
//!
//! 入力に対する純関数。検索文字列が変わるたびに呼び直してよい。

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::Record;

/// 名前が空のレコードを入れるセクション
pub const EMPTY_NAME_SECTION: &str = "#";

/// 頭文字ごとのセクション
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section<R> {
    pub title: String,
    pub items: Vec<R>,
}

/// セクション見出し: 名前の先頭 1 文字を大文字化したもの
pub fn section_title(name: &str) -> String {
    match name.chars().next() {
        Some(c) => c.to_uppercase().collect(),
        None => EMPTY_NAME_SECTION.to_string(),
    }
}

/// レコード集合と検索文字列からセクション列を導出する
///
/// - 無効化済み（`ativo == false`）のレコードはここで除外する
/// - 一致判定は `Record::matches_query`（空文字列は全件一致）
/// - 見出しは昇順、セクション内は入力順
pub fn derive_sections<R: Record>(records: &[R], query: &str) -> Vec<Section<R>> {
    let mut grouped: BTreeMap<String, Vec<R>> = BTreeMap::new();
    for record in records
        .iter()
        .filter(|r| r.is_active())
        .filter(|r| r.matches_query(query))
    {
        grouped
            .entry(section_title(record.name()))
            .or_default()
            .push(record.clone());
    }
    grouped
        .into_iter()
        .map(|(title, items)| Section { title, items })
        .collect()
}

/// セクション内のレコード総数
pub fn count_items<R>(sections: &[Section<R>]) -> usize {
    sections.iter().map(|s| s.items.len()).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{sample, Medico, Paciente, RecordId};

    fn names<R: Record>(section: &Section<R>) -> Vec<&str> {
        section.items.iter().map(|r| r.name()).collect()
    }

    fn medico(id: i64, nome: &str, especialidade: &str) -> Medico {
        let mut m = Medico::blank();
        m.id = Some(RecordId::new(id));
        m.nome = nome.to_string();
        m.especialidade = especialidade.to_string();
        m
    }

    #[test]
    fn test_empty_query_groups_all_sorted() {
        let sections = derive_sections(&sample::medicos(), "");
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "J", "M"]);
        assert_eq!(names(&sections[0]), vec!["Antônio de Oliveira"]);
        assert_eq!(count_items(&sections), 3);
    }

    #[test]
    fn test_cardio_matches_only_cardiologista() {
        let sections = derive_sections(&sample::medicos(), "cardio");
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].title, "J");
        assert_eq!(names(&sections[0]), vec!["João de Oliveira"]);
    }

    #[test]
    fn test_query_is_case_insensitive_on_name() {
        let sections = derive_sections(&sample::medicos(), "OLIVEIRA");
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["A", "J"]);
    }

    #[test]
    fn test_paciente_cpf_substring() {
        let sections = derive_sections(&sample::pacientes(), "987.654");
        assert_eq!(sections.len(), 1);
        assert_eq!(names(&sections[0]), vec!["Alice Lima"]);

        let sections = derive_sections(&sample::pacientes(), "pedro");
        assert_eq!(names(&sections[0]), vec!["Pedro Alves"]);
    }

    #[test]
    fn test_within_section_keeps_input_order() {
        let records = vec![
            medico(1, "bruno", "X"),
            medico(2, "Ana", "X"),
            medico(3, "Beatriz", "X"),
            medico(4, "alberto", "X"),
        ];
        let sections = derive_sections(&records, "");
        assert_eq!(sections[0].title, "A");
        assert_eq!(names(&sections[0]), vec!["Ana", "alberto"]);
        assert_eq!(sections[1].title, "B");
        assert_eq!(names(&sections[1]), vec!["bruno", "Beatriz"]);
    }

    #[test]
    fn test_inactive_records_are_dropped() {
        let mut records = sample::medicos();
        records[0].ativo = false;
        let sections = derive_sections(&records, "");
        assert_eq!(count_items(&sections), 2);
        assert!(sections.iter().all(|s| s.title != "J"));
    }

    #[test]
    fn test_empty_name_goes_to_reserved_section() {
        let records = vec![medico(1, "", "Neurologia"), medico(2, "Zé", "Neurologia")];
        let sections = derive_sections(&records, "neuro");
        assert_eq!(sections[0].title, EMPTY_NAME_SECTION);
        assert_eq!(sections[0].items[0].id, Some(RecordId::new(1)));
        assert_eq!(sections[1].title, "Z");
    }

    #[test]
    fn test_no_match_yields_no_sections() {
        assert!(derive_sections(&sample::medicos(), "xyz").is_empty());
        assert!(derive_sections::<Paciente>(&[], "").is_empty());
    }

    #[test]
    fn test_titles_unique_and_each_record_once() {
        let mut records = sample::medicos();
        records.push(medico(4, "maria Clara", "Pediatria"));
        records.push(medico(5, "Ítalo", "Pediatria"));
        let sections = derive_sections(&records, "");
        let titles: Vec<&str> = sections.iter().map(|s| s.title.as_str()).collect();
        let mut sorted = titles.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(titles, sorted);
        assert_eq!(count_items(&sections), records.len());
        for r in &records {
            let hits: usize = sections
                .iter()
                .map(|s| s.items.iter().filter(|i| i.id == r.id).count())
                .sum();
            assert_eq!(hits, 1);
            let owner = sections.iter().find(|s| s.items.contains(r)).unwrap();
            assert_eq!(owner.title, section_title(&r.nome));
        }
    }

    #[test]
    fn test_idempotent() {
        let records = sample::medicos();
        assert_eq!(derive_sections(&records, "de"), derive_sections(&records, "de"));
    }

    #[test]
    fn test_section_title_unicode_uppercase() {
        assert_eq!(section_title("ítalo"), "Í");
        assert_eq!(section_title("ßa"), "SS");
        assert_eq!(section_title(""), "#");
    }
}
