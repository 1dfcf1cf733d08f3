//! Questionnaire layout.
//!
//! [`build`] replays the paper form block by block. The order of blocks is
//! fixed. Answers only decide which boxes are ticked and whether the hidden
//! homelessness follow-ups appear at all.

use crate::{
    answers::Answers,
    checkbox::{self, Glyph, is_yes, yes_no},
    document::{
        Alignment, Document, PageSetup, Paragraph, Row, Run, Section,
        layout::{
            CONTENT_WIDTH, HEADER_FILL, bold, cell, check_list, empty, full_width, header,
            inline_checks, paragraph, run, split_columns, table, text, three_col,
            three_col_table, two_col, two_col_check_table, two_col_table,
        },
    },
    record::ResponseRecord,
};

pub mod options;

use options::*;

const TITLE: &str = "Kwestionariusz osoby w kryzysie bezdomności w ramach Ogólnopolskiego badania liczby osób w kryzysie bezdomności \u{2013} rok badania: 2026*";
const EMERGENCY: &str = "W przypadku stwierdzenia przez ankietera zagrożenia życia lub zdrowia osoby bezdomnej należy niezwłocznie powiadomić odpowiednie służby, w tym policję \u{2013} tel. 112 i 997";
const NOTICE: &str = "Pierwszym pytaniem, które należy zadać respondentowi jest pytanie czy w dniu dzisiejszym był badany tym wywiadem. Jeśli dana osoba już uczestniczyła w wywiadzie prosimy nie rozpoczynać wywiadu. Jeśli z osobą bezdomną z pewnych względów jest utrudniony kontakt bądź odmawia wzięcia udziału w badaniu, prosimy o wypełnienie kwestionariusza z zaznaczeniem miejsca przebywania, płci, szacowanego wieku. W przypadku dzieci (0-17 lat) wypełniamy tylko pytania 1-4 oraz miejsce przebywania.";
const LOCATION: &str = "Województwo \u{2013} Pomorskie      Powiat \u{2013} Gdynia      Gmina \u{2013} Gdynia      Miejscowość \u{2013} Gdynia";
const FOOTNOTE: &str = "*Wzór kwestionariusza może ulec zmianie. W takim przypadku zostanie ona zakomunikowana w odpowiednim czasie przed badaniem.";
const BLANK_LINE: &str = "_______________________________________________";

/// Render one stored response as the paper questionnaire.
pub fn build(record: &ResponseRecord) -> Document {
    let a = &record.answers;
    let mut section = Section::default();

    section.push(
        paragraph(vec![bold(TITLE)])
            .align(Alignment::Center)
            .spacing(0, 60),
    );
    introduction(a, &mut section);
    section.push(empty());
    place(a, &mut section);
    section.push(empty());
    section.push(header("PYTANIA"));
    sex_and_age(a, &mut section);
    citizenship(a, &mut section);
    registration_and_duration(a, &mut section);
    demographics(a, &mut section);
    section.push(question_title(
        "9. Jakie źródła dochodu Pan(i) posiada? (Można zaznaczyć dowolną liczbę odpowiedzi):",
    ));
    section.push(two_col_check_table(a, "p9_dochody", &INCOME));
    section.push(question_title(
        "10. Które wydarzenia były według Pana(i) przyczyną bezdomności? (proszę zaznaczyć maksymalnie 3):",
    ));
    section.push(two_col_check_table(a, "p10_przyczyny", &CAUSES));
    help(a, &mut section);
    hidden_homelessness(a, &mut section);
    interviewer(a, &mut section);
    footer(record, &mut section);

    Document {
        page: PageSetup::A4_NARROW,
        sections: vec![section],
    }
}

fn question_title(title: &str) -> Paragraph {
    paragraph(vec![bold(title)]).spacing(40, 20)
}

fn titled(title: &str, mut lines: Vec<Paragraph>) -> Vec<Paragraph> {
    lines.insert(0, paragraph(vec![bold(title)]));
    lines
}

fn yes_no_run(a: &Answers, key: &str, gap: &str) -> Run {
    let answer = yes_no(a, key);
    run(format!("{} Tak{gap}{} Nie", answer.yes, answer.no))
}

fn introduction(a: &Answers, out: &mut Section) {
    out.push(table(
        vec![CONTENT_WIDTH],
        vec![
            Row {
                cells: vec![
                    cell(vec![paragraph(vec![bold("WSTĘP")])], CONTENT_WIDTH).shaded(HEADER_FILL),
                ],
            },
            Row {
                cells: vec![cell(
                    vec![paragraph(vec![bold(EMERGENCY)]).align(Alignment::Center)],
                    CONTENT_WIDTH,
                )],
            },
        ],
    ));

    let duplicate = Glyph::from_bool(is_yes(a, "duplikat"));
    let full = checkbox::resolve(a, "sposob_wypelnienia", "Pełny");
    let short = checkbox::resolve(a, "sposob_wypelnienia", "Skrócony");
    out.push(two_col_table(vec![
        two_col(
            vec![paragraph(vec![
                bold("\u{25a0} Czy był przeprowadzony z Panią/Panem taki wywiad dzisiaj?  "),
                yes_no_run(a, "wywiad_dzisiaj", "   "),
            ])],
            vec![paragraph(vec![
                bold("\u{25a0} Czy zgadza się Pan/i na udział w badaniu?  "),
                yes_no_run(a, "zgoda_udzial", "   "),
            ])],
        ),
        two_col(
            vec![text(format!(
                "\u{25a0} Jeśli tak, zakończyć i zaznaczyć duplikat: {duplicate}"
            ))],
            vec![paragraph(vec![
                bold("\u{25a0} Sposób wypełnienia:  "),
                run(format!("{full} pełny / {short} skrócony")),
            ])],
        ),
    ]));

    out.push(full_width(vec![vec![paragraph(vec![
        bold("UWAGA!!! "),
        run(NOTICE),
    ])]]));
}

fn place(a: &Answers, out: &mut Section) {
    out.push(header(
        "MIEJSCE PRZEPROWADZENIA BADANIA / PRZEBYWANIA OSOBY W KRYZYSIE BEZDOMNOŚCI",
    ));
    out.push(full_width(vec![vec![paragraph(vec![bold(LOCATION)])]]));
    out.push(
        paragraph(vec![
            bold("Czy miasto powyżej 100 tysięcy mieszkańców?  "),
            yes_no_run(a, "miasto_powyzej_100k", "   "),
        ])
        .spacing(40, 20),
    );
    out.push(two_col_check_table(a, "miejsce_pobytu", &PLACES));
    out.push(paragraph(vec![
        run("Po zaznaczeniu proszę wpisać nazwę miejsca/opisać je: "),
        run(a.text("miejsce_nazwa").unwrap_or(BLANK_LINE)),
    ]));
}

fn sex_and_age(a: &Answers, out: &mut Section) {
    let [female, male] = SEX.map(|label| checkbox::resolve(a, "p1_plec", label));
    let [declared, estimated] = AGE_KIND.map(|label| checkbox::resolve(a, "p2_wiek_typ", label));
    let [adult, child] = AGE_CATEGORY.map(|label| checkbox::resolve(a, "p2_wiek_kategoria", label));
    let age = a.text("p2_wiek_liczba").unwrap_or("......");
    out.push(two_col_table(vec![two_col(
        vec![paragraph(vec![
            bold("1. Płeć  "),
            run(format!("1.1. kobieta {female}   1.2. mężczyzna {male}")),
        ])],
        vec![paragraph(vec![
            bold("2. Wiek: "),
            run(format!(
                "{age} lat   {declared} wiek deklarowany  {estimated} wiek oszacowany\n{adult} osoba dorosła (pow. 18 lat)  {child} dziecko (0\u{2013}17 lat)"
            )),
        ])],
    )]));
}

fn citizenship(a: &Answers, out: &mut Section) {
    out.push(full_width(vec![vec![paragraph(vec![bold(
        "3. Obywatelstwo i dane o statusie uchodźcy",
    )])]]));
    out.push(two_col_table(vec![two_col(
        titled(
            "3.1. Obywatelstwo",
            check_list(a, "p3_obywatelstwo", &CITIZENSHIP),
        ),
        titled(
            "3.2. Status cudzoziemca",
            check_list(a, "p3_status_cudzoziemca", &FOREIGNER_STATUS),
        ),
    )]));
}

fn registration_and_duration(a: &Answers, out: &mut Section) {
    out.push(two_col_table(vec![two_col(
        titled(
            "4. Czy posiada Pan(i) zameldowanie na pobyt stały?",
            check_list(a, "p4_zameldowanie", &REGISTRATION),
        ),
        titled(
            "5. Jak długo doświadcza Pan/i bezdomności?",
            check_list(a, "p5_czas_bezdomnosci", &HOMELESSNESS_DURATION),
        ),
    )]));
}

fn demographics(a: &Answers, out: &mut Section) {
    out.push(three_col_table(vec![three_col([
        titled(
            "6. Stan cywilny",
            check_list(a, "p6_stan_cywilny", &MARITAL_STATUS),
        ),
        titled(
            "7. Wykształcenie",
            check_list(a, "p7_wyksztalcenie", &EDUCATION),
        ),
        titled(
            "8. Z kim obecnie Pani/Pan gospodaruje",
            check_list(a, "p8_gospodarstwo", &HOUSEHOLD),
        ),
    ])]));
}

fn help(a: &Answers, out: &mut Section) {
    out.push(two_col_table(vec![two_col(
        titled(
            "11. Czy Pan(i) korzysta z pomocy i w jakiej postaci? (proszę zaznaczyć wszystkie formy):",
            check_list(a, "p11_pomoc", &HELP_USED),
        ),
        titled(
            "12. W jakich obszarach oczekuje Pan(i) wsparcia/pomocy? (maksymalnie 3 potrzeby):",
            check_list(a, "p12_oczekiwane_wsparcie", &SUPPORT_EXPECTED),
        ),
    )]));
}

/// Question 13 with its three gated follow-ups.
fn hidden_homelessness(a: &Answers, out: &mut Section) {
    out.push(full_width(vec![vec![paragraph(vec![bold(
        "13. Pytania o tzw. bezdomność ukrytą",
    )])]]));

    let mut lines = vec![
        text("13.1. Czy obecnie Pan(i) pomieszkuje w domu/mieszkaniu u rodziny, znajomych, czy innych osób, tj. nie ma Pan(i) własnego miejsca zamieszkania i przebywa tymczasowo u innych osób?"),
        paragraph(vec![yes_no_run(a, "p13_1_czy_pomieszkuje", "    ")]),
    ];
    if is_yes(a, "p13_1_czy_pomieszkuje") {
        lines.push(text("13.1.2. Jak długo obecnie Pan(i) pomieszkuje...?"));
        lines.push(paragraph(inline_checks(
            a,
            "p13_1_2_jak_dlugo",
            &LODGING_DURATION,
        )));
    }

    lines.push(text(
        "13.2. Czy w przeszłości Pan(i) tymczasowo pomieszkiwał(a)...?",
    ));
    lines.push(paragraph(vec![yes_no_run(
        a,
        "p13_2_czy_pomieszkiwal",
        "    ",
    )]));
    if is_yes(a, "p13_2_czy_pomieszkiwal") {
        lines.push(text(
            "13.2. Jak długo tymczasowo Pan(i) pomieszkiwał(a)...?",
        ));
        lines.push(paragraph(inline_checks(
            a,
            "p13_2_jak_dlugo",
            &LODGING_DURATION,
        )));
    }

    lines.push(text("13.3. Czy zna Pan(i) inne osoby, które w ciągu ostatnich 12 miesięcy tymczasowo pomieszkiwały...?"));
    lines.push(paragraph(vec![yes_no_run(a, "p13_3_czy_zna", "    ")]));
    if is_yes(a, "p13_3_czy_zna") {
        let mut runs = vec![run("jeśli Tak, ile Pan(i) zna takich osób:  ")];
        runs.extend(inline_checks(a, "p13_3_ile_osob", &ACQUAINTANCE_COUNT));
        lines.push(paragraph(runs));
    }

    out.push(full_width(vec![lines]));
}

fn interviewer(a: &Answers, out: &mut Section) {
    out.push(header("FUNKCJA ANKIETERA"));
    let (left, right) = split_columns(&INTERVIEWER_ROLE);
    out.push(two_col_table(vec![two_col(
        check_list(a, "funkcja_ankietera", left),
        check_list(a, "funkcja_ankietera", right),
    )]));
}

fn footer(record: &ResponseRecord, out: &mut Section) {
    out.push(paragraph(vec![run(FOOTNOTE).size(16)]).spacing(80, 20));
    out.push(paragraph(vec![
        run(format!(
            "Wygenerowano automatycznie | ID: {} | {}",
            record.id,
            record.date()
        ))
        .size(14)
        .color("999999"),
    ]));
}
