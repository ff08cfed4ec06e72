//! Генератор фиктивных персональных данных
//!
//! Все поля выбираются равновероятно из фиксированных списков:
//! - Фамилия и имя (пул имён зависит от пола)
//! - Дата рождения (1970–2000, день не больше 28)
//! - Префектура, город и номер квартала

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;

const SURNAMES: &[&str] = &[
    "山田", "佐藤", "鈴木", "田中", "高橋", "伊藤", "渡辺", "中村", "小林", "加藤",
    "吉田", "山本", "松本", "井上", "木村", "林", "斎藤", "清水", "山崎", "森",
];

const GIVEN_NAMES_MALE: &[&str] = &[
    "太郎", "一郎", "健太", "翔太", "大輔", "直樹", "拓也", "和也", "達也", "雄太",
];

const GIVEN_NAMES_FEMALE: &[&str] = &[
    "花子", "美咲", "愛", "さくら", "陽子", "真由美", "裕子", "恵子", "明美", "由美",
];

const PREFECTURES: &[(&str, &[&str])] = &[
    ("東京都", &["渋谷区", "新宿区", "港区", "千代田区", "中央区", "世田谷区", "目黒区"]),
    ("大阪府", &["大阪市北区", "大阪市中央区", "大阪市西区", "堺市", "豊中市"]),
    ("愛知県", &["名古屋市中区", "名古屋市東区", "名古屋市西区", "豊田市", "岡崎市"]),
    ("福岡県", &["福岡市博多区", "福岡市中央区", "北九州市", "久留米市"]),
    ("北海道", &["札幌市中央区", "札幌市北区", "函館市", "旭川市"]),
    ("神奈川県", &["横浜市西区", "横浜市中区", "川崎市", "相模原市"]),
    ("埼玉県", &["さいたま市大宮区", "さいたま市浦和区", "川口市", "所沢市"]),
    ("千葉県", &["千葉市中央区", "船橋市", "市川市", "柏市"]),
    ("兵庫県", &["神戸市中央区", "姫路市", "西宮市", "尼崎市"]),
    ("京都府", &["京都市中京区", "京都市下京区", "宇治市", "舞鶴市"]),
];

/// Пол, определяющий пул имён
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    fn given_names(self) -> &'static [&'static str] {
        match self {
            Gender::Male => GIVEN_NAMES_MALE,
            Gender::Female => GIVEN_NAMES_FEMALE,
        }
    }
}

/// Дата рождения в японском формате (`1990年1月1日`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BirthDate {
    pub year: u16,
    pub month: u8,
    pub day: u8,
}

impl fmt::Display for BirthDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}年{}月{}日", self.year, self.month, self.day)
    }
}

/// Номер квартала `chome-ban-go`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockNumber {
    pub chome: u8,
    pub ban: u8,
    pub go: u8,
}

impl fmt::Display for BlockNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.chome, self.ban, self.go)
    }
}

/// Персональные данные одного резюме
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub surname: String,
    pub given_name: String,
    pub gender: Gender,
    pub birth_date: BirthDate,
    pub prefecture: String,
    pub city: String,
    pub block: BlockNumber,
}

impl Person {
    /// Генерация случайной записи
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let surname = pick(rng, SURNAMES);
        let gender = if rng.gen_bool(0.5) { Gender::Male } else { Gender::Female };
        let given_name = pick(rng, gender.given_names());

        let birth_date = BirthDate {
            year: rng.gen_range(1970..=2000),
            month: rng.gen_range(1..=12),
            // 28 keeps every month valid
            day: rng.gen_range(1..=28),
        };

        let (prefecture, cities) = pick(rng, PREFECTURES);
        let city = pick(rng, cities);
        let block = BlockNumber {
            chome: rng.gen_range(1..=5),
            ban: rng.gen_range(1..=20),
            go: rng.gen_range(1..=30),
        };

        Self {
            surname: surname.to_string(),
            given_name: given_name.to_string(),
            gender,
            birth_date,
            prefecture: prefecture.to_string(),
            city: city.to_string(),
            block,
        }
    }

    /// Полное имя: фамилия + имя без пробела
    pub fn full_name(&self) -> String {
        format!("{}{}", self.surname, self.given_name)
    }

    /// Адрес одной строкой
    pub fn address(&self) -> String {
        format!("{}{}{}", self.prefecture, self.city, self.block)
    }

    /// Эталонный текст, который OCR должен извлечь со страницы
    pub fn ground_truth(&self) -> String {
        format!(
            "氏名: {}\n生年月日: {}\n住所: {}",
            self.full_name(),
            self.birth_date,
            self.address()
        )
    }
}

fn pick<T: Copy, R: Rng + ?Sized>(rng: &mut R, items: &[T]) -> T {
    items[rng.gen_range(0..items.len())]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_same_seed_same_people() {
        let mut a = Pcg32::seed_from_u64(42);
        let mut b = Pcg32::seed_from_u64(42);

        for _ in 0..20 {
            assert_eq!(Person::random(&mut a), Person::random(&mut b));
        }
    }

    #[test]
    fn test_fields_in_range() {
        let mut rng = Pcg32::seed_from_u64(7);

        for _ in 0..500 {
            let person = Person::random(&mut rng);
            assert!(SURNAMES.contains(&person.surname.as_str()));
            assert!(person.gender.given_names().contains(&person.given_name.as_str()));
            assert!((1970..=2000).contains(&person.birth_date.year));
            assert!((1..=12).contains(&person.birth_date.month));
            assert!((1..=28).contains(&person.birth_date.day));
            assert!((1..=5).contains(&person.block.chome));
            assert!((1..=20).contains(&person.block.ban));
            assert!((1..=30).contains(&person.block.go));

            let cities = PREFECTURES
                .iter()
                .find(|(pref, _)| *pref == person.prefecture)
                .map(|(_, cities)| *cities)
                .unwrap();
            assert!(cities.contains(&person.city.as_str()));
        }
    }

    #[test]
    fn test_ground_truth_format() {
        let person = Person {
            surname: "山田".to_string(),
            given_name: "太郎".to_string(),
            gender: Gender::Male,
            birth_date: BirthDate { year: 1990, month: 1, day: 5 },
            prefecture: "東京都".to_string(),
            city: "渋谷区".to_string(),
            block: BlockNumber { chome: 1, ban: 2, go: 3 },
        };

        assert_eq!(person.full_name(), "山田太郎");
        assert_eq!(person.address(), "東京都渋谷区1-2-3");
        assert_eq!(
            person.ground_truth(),
            "氏名: 山田太郎\n生年月日: 1990年1月5日\n住所: 東京都渋谷区1-2-3"
        );
    }
}
