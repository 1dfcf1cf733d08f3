use std::io::{Cursor, Read};

use chrono::NaiveDate;
use reqwest::{Method, StatusCode};

use crate::{
    api::{self, Request},
    backend::local::LocalDatabase,
    checkbox::{EMPTY, TICK},
    store::responses,
};

fn document_xml(docx: &[u8]) -> String {
    let mut package = zip::ZipArchive::new(Cursor::new(docx)).unwrap();
    let mut xml = String::new();
    package
        .by_name("word/document.xml")
        .unwrap()
        .read_to_string(&mut xml)
        .unwrap();
    xml
}

#[tokio::test]
async fn test() {
    let db = LocalDatabase::open("sqlite::memory:").await.unwrap();
    let client = db.client();
    let today = NaiveDate::from_ymd_opt(2026, 10, 14).unwrap();

    let submissions = [
        serde_json::json!({
            "id": "tablet-1",
            "ts": "2026-01-28T21:15:00Z",
            "answers": {
                "p1_plec": "1.2. Mężczyzna",
                "p9_dochody": ["9.9", "9.1"],
                "p13_1_czy_pomieszkuje": "TAK",
                "p13_1_2_jak_dlugo": "Powyżej 5 lat",
            }
        }),
        // answers posted as a string are stored verbatim and decoded on read
        serde_json::json!({
            "id": 2,
            "ts": "2026-01-29T07:00:00Z",
            "answers": "{\"p1_plec\":\"1.1\",\"p13_1_czy_pomieszkuje\":\"NIE\"}"
        }),
        serde_json::json!({ "ts": "2026-01-29T08:30:00Z", "answers": "not json" }),
    ];
    for (index, body) in submissions.iter().enumerate() {
        let request = Request::new(Method::POST, "/api/responses").with_body(body.to_string());
        let response = api::handle(&client, &request, today).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.json_body().unwrap()["db_id"], index as i64 + 1);
    }

    #[derive(sqlx::FromRow, Debug, PartialEq, Eq)]
    struct StoredRow {
        ext_id: Option<String>,
        answers: String,
    }
    let rows =
        sqlx::query_as::<_, StoredRow>("SELECT ext_id, answers FROM responses ORDER BY id ASC")
            .fetch_all(db.pool())
            .await
            .unwrap();
    assert_eq!(rows[0].ext_id.as_deref(), Some("tablet-1"));
    assert_eq!(rows[1].ext_id.as_deref(), Some("2"));
    assert_eq!(rows[2].ext_id, None);
    assert_eq!(
        rows[1].answers,
        "{\"p1_plec\":\"1.1\",\"p13_1_czy_pomieszkuje\":\"NIE\"}"
    );
    assert_eq!(rows[2].answers, "not json");

    let first = responses::fetch_one(&client, 1).await.unwrap().unwrap();
    assert_eq!(
        first.answers.get("p9_dochody").values(),
        ["9.9".to_owned(), "9.1".to_owned()]
    );

    let response = api::handle(&client, &Request::new(Method::GET, "/export"), today).await;
    assert_eq!(response.status, StatusCode::OK);
    let mut archive = zip::ZipArchive::new(Cursor::new(response.body)).unwrap();
    let names = (0..archive.len())
        .map(|i| archive.by_index(i).unwrap().name().to_owned())
        .collect::<Vec<_>>();
    assert_eq!(
        names,
        [
            "kwestionariusz_0001_2026-01-28.docx",
            "kwestionariusz_0002_2026-01-29.docx",
            "kwestionariusz_0003_2026-01-29.docx",
        ]
    );
    let documents = names
        .iter()
        .map(|name| {
            let mut bytes = Vec::new();
            archive
                .by_name(name)
                .unwrap()
                .read_to_end(&mut bytes)
                .unwrap();
            document_xml(&bytes)
        })
        .collect::<Vec<_>>();

    assert!(documents[0].contains(&format!("1.2. mężczyzna {TICK}")));
    assert!(documents[0].contains(&format!("{TICK} 9.1. zatrudnienie")));
    assert!(documents[0].contains(&format!("{TICK} 9.9. renta/emerytura")));
    assert!(documents[0].contains(&format!("{TICK} Powyżej 5 lat")));
    assert!(documents[0].contains("ID: 1 | 2026-01-28"));

    assert!(documents[1].contains(&format!("1.1. kobieta {TICK}")));
    assert!(!documents[1].contains("13.1.2."));

    assert!(!documents[2].contains(TICK));
    assert!(documents[2].contains(&format!("{EMPTY} 1. Noclegownia")));

    let response = api::handle(
        &client,
        &Request::new(Method::DELETE, "/responses/2"),
        today,
    )
    .await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let listing = api::handle(&client, &Request::new(Method::GET, "/responses"), today)
        .await
        .json_body()
        .unwrap();
    assert_eq!(listing["total"], 2);
    assert_eq!(listing["items"][1]["id"], 3);
}
