#![allow(dead_code)]

use lexicon_lab::Lexicon;
use lexicon_types::RawRecord;

const CORPUS: &[(&str, &str, &[&str])] = &[
    ("中国", "词语", &["zhōng guó"]),
    ("天长地久", "成语", &["tiān cháng dì jiǔ"]),
    ("高高兴兴", "成语", &["gāo gāo xìng xìng"]),
    ("一心一意", "成语", &["yī xīn yī yì"]),
    ("研究研究", "词语", &["yán jiū yán jiū"]),
    ("朝阳", "词语", &["zhāo yáng", "cháo yáng"]),
    ("天才", "词语", &["tiān cái"]),
    ("通才", "词语", &["tōng cái"]),
    ("口才", "词语", &["kǒu cái"]),
    ("作词作曲", "成语", &["zuò cí zuò qǔ"]),
    ("作词", "词语", &["zuò cí"]),
    ("心心相印", "成语", &["xīn xīn xiāng yìn"]),
    ("心花怒放", "成语", &["xīn huā nù fàng"]),
    ("新年", "词语", &["xīn nián"]),
    ("一", "词语", &["yī"]),
    ("一五一十", "成语", &["yī wǔ yī shí"]),
    ("以逸待劳", "成语", &["yǐ yì dài láo"]),
    ("一不做二不休", "成语", &["yī bù zuò èr bù xiū"]),
    ("好朋友", "词语", &["hǎo péng you"]),
    ("放风筝", "词语", &["fàng fēng zheng"]),
    ("看电影", "词语", &["kàn diàn yǐng"]),
    ("画蛇添足", "成语", &["huà shé tiān zú"]),
    ("风和日丽", "成语", &["fēng hé rì lì"]),
    ("自高自大", "成语", &["zì gāo zì dà"]),
    ("下雨", "词语", &["xià yǔ"]),
    ("小猪", "词语", &["xiǎo zhū"]),
    ("海燕", "词语", &["hǎi yàn"]),
];

pub fn records() -> Vec<RawRecord> {
    CORPUS
        .iter()
        .map(|(text, category, readings)| RawRecord {
            text: text.to_string(),
            category: Some(category.to_string()),
            readings: readings.iter().map(|r| r.to_string()).collect(),
            ..RawRecord::default()
        })
        .collect()
}

pub fn lexicon() -> Lexicon {
    Lexicon::build(&records()).expect("build lexicon")
}
