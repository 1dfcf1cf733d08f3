//! Option labels of the 2026 questionnaire, in form order.

pub const PLACES: [&str; 17] = [
    "1. Noclegownia",
    "2. Ogrzewalnia",
    "3. Schronisko dla osób bezdomnych",
    "4. Schronisko dla osób bezdomnych z usługami opiekuńczymi",
    "5. Mieszkanie wspomagane",
    "6. Mieszkanie treningowe",
    "7. Dom dla matek z małoletnimi dziećmi i kobiet w ciąży",
    "8. Ośrodek interwencji kryzysowej",
    "9. Specjalistyczny ośrodek wsparcia dla osób doznających przemocy domowej",
    "10. Szpital, hospicjum, ZOL, inna placówka zdrowia",
    "11. Zakład karny, areszt śledczy",
    "12. Izba wytrzeźwień, pogotowie socjalne",
    "13. Instytucja zdrowia psychicznego/leczenia uzależnień",
    "14. Inna placówka/miejsce mieszkalne",
    "15. Pustostan",
    "16. Domek na działce, altana działkowa",
    "17. Miejsce niemieszkalne: ulica, klatka schodowa, dworzec PKP/PKS, altana śmietnikowa, piwnica, itp.",
];

pub const SEX: [&str; 2] = ["1.1. Kobieta", "1.2. Mężczyzna"];

pub const AGE_KIND: [&str; 2] = ["Wiek deklarowany", "Wiek oszacowany"];

pub const AGE_CATEGORY: [&str; 2] = ["Osoba dorosła (pow. 18 lat)", "Dziecko (0\u{2013}17 lat)"];

pub const CITIZENSHIP: [&str; 6] = [
    "Polskie",
    "Ukraińskie",
    "Inne z Europy (wyłączając Ukrainę)",
    "Inne z Azji",
    "Inne z Afryki",
    "Inne pozostałe lub brak",
];

pub const FOREIGNER_STATUS: [&str; 4] = [
    "Uchodźcy",
    "Ochrona tymczasowa",
    "Stały pobyt",
    "Nieuregulowany",
];

pub const REGISTRATION: [&str; 4] = [
    "4.1. Tak, w gminie obecnego pobytu",
    "4.2. Tak, poza gminą obecnego pobytu",
    "4.3. Nie, ostatnie zameldowanie było w gminie obecnego pobytu",
    "4.4. Nie, ostatnie zameldowanie było poza gminą obecnego pobytu",
];

pub const HOMELESSNESS_DURATION: [&str; 8] = [
    "5.1. Do 3 miesięcy",
    "5.2. Od 3 do 6 miesięcy",
    "5.3. Od 6 do 12 miesięcy",
    "5.4. Od 12 do 24 miesięcy",
    "5.5. Od 2 do 5 lat",
    "5.6. Od 5 do 10 lat",
    "5.7. Od 10 lat do 20 lat",
    "5.8. Powyżej 20 lat",
];

pub const MARITAL_STATUS: [&str; 6] = [
    "6.1. kawaler/panna",
    "6.2. żonaty/zamężna",
    "6.3. rozwiedziony/rozwiedziona",
    "6.4. wdowiec/wdowa",
    "6.5. w wolnym związku",
    "6.6. w separacji",
];

pub const EDUCATION: [&str; 7] = [
    "7.1. niepełne podstawowe",
    "7.2. podstawowe",
    "7.3. gimnazjalne",
    "7.4. zawodowe",
    "7.5. średnie (techniczne też)",
    "7.6. wyższe",
    "7.7. nie wiem",
];

pub const HOUSEHOLD: [&str; 6] = [
    "8.1. samodzielnie/samotnie",
    "8.2. partner/partnerka",
    "8.3. kolega/koleżanka/znajomy/znajoma",
    "8.4. małoletnie dzieci (0\u{2013}17 lat)",
    "8.5. dorosłe dzieci/członkowie dalszej rodziny",
    "8.6. zbiorowo/w grupie",
];

pub const INCOME: [&str; 11] = [
    "9.1. zatrudnienie",
    "9.2. praca na czarno",
    "9.3. praca chroniona/zatrudnienie wspierane",
    "9.4. zbieractwo",
    "9.5. zasiłek z pomocy społecznej",
    "9.6. świadczenia ZUS",
    "9.7. żebractwo",
    "9.8. alimenty",
    "9.9. renta/emerytura",
    "9.10. nie posiadam dochodu",
    "9.11. odmowa odpowiedzi",
];

pub const CAUSES: [&str; 20] = [
    "10.1. konflikt rodzinny",
    "10.2. odejście/śmierć rodzica/opiekuna w dzieciństwie",
    "10.3. przemoc domowa",
    "10.4. rozpad związku",
    "10.5. zadłużenie",
    "10.6. bezrobocie, brak pracy, utrata pracy",
    "10.7. problemy wynikające z orientacji seksualnej",
    "10.8. zły stan zdrowia, niepełnosprawność",
    "10.9. eksmisja, wymeldowanie z mieszkania",
    "10.10. uzależnienie od alkoholu",
    "10.11. uzależnienie od narkotyków",
    "10.12. uzależnienie od hazardu",
    "10.13. migracja/wyjazd na stałe do innego kraju",
    "10.14. choroba/zaburzenia psychiczne inne niż uzależnienia",
    "10.15. opuszczenie placówki opiekuńczo-wychowawczej",
    "10.16. opuszczenie zakładu karnego",
    "10.17. konflikt z prawem",
    "10.18. inna przemoc niż domowa",
    "10.19. problemy wynikające ze zmiany wiary",
    "10.20. odmowa odpowiedzi",
];

pub const HELP_USED: [&str; 7] = [
    "11.1. wsparcie finansowe",
    "11.2. posiłek",
    "11.3. odzież",
    "11.4. schronienie",
    "11.5. terapia uzależnień",
    "11.6. opieka zdrowotna",
    "11.7. nie korzystam",
];

pub const SUPPORT_EXPECTED: [&str; 12] = [
    "12.1. żywnościowe",
    "12.2. higieniczne (w tym dostęp do łaźni)",
    "12.3. zdrowotne",
    "12.4. schronienie",
    "12.5. terapia uzależnień",
    "12.6. wsparcie psychologiczne",
    "12.7. pomoc prawna",
    "12.8. pomoc w znalezieniu pracy",
    "12.9. finansowe",
    "12.10. mieszkaniowe",
    "12.11. wyjście z długów",
    "12.12. nie oczekuję pomocy",
];

pub const LODGING_DURATION: [&str; 5] = [
    "Do 3 miesięcy",
    "Od 3 do 12 miesięcy",
    "Od 1 roku do 2 lat",
    "Od 2 do 5 lat",
    "Powyżej 5 lat",
];

pub const ACQUAINTANCE_COUNT: [&str; 4] = [
    "1\u{2013}2",
    "3\u{2013}5",
    "6\u{2013}10",
    "Więcej niż 10",
];

pub const INTERVIEWER_ROLE: [&str; 7] = [
    "Wolontariusz",
    "Pracownik socjalny",
    "Pracownik placówki dla bezdomnych",
    "Inna",
    "Pracownik gminy",
    "Strażnik miejski / policjant",
    "Pracownik do spraw streetworkingu (Streetworker)",
];
