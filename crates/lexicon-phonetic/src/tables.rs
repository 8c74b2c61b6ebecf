use std::collections::{HashMap, HashSet};

use once_cell::sync::Lazy;

/// Initials ordered longest first so prefix matching prefers `zh` over `z`.
pub const INITIALS: &[&str] = &[
    "zh", "ch", "sh", "b", "p", "m", "f", "d", "t", "n", "l", "g", "k", "h", "j", "q", "x", "r",
    "z", "c", "s", "y", "w",
];

pub const FINALS: &[&str] = &[
    "a", "ai", "an", "ang", "ao", "e", "ei", "en", "eng", "er", "i", "ia", "ian", "iang", "iao",
    "ie", "in", "ing", "iong", "iu", "o", "ong", "ou", "u", "ua", "uai", "uan", "uang", "ue", "ui",
    "un", "uo", "v", "ve",
];

/// Longest legal syllable (`zhuang`, `chuang`, `shuang`).
pub const MAX_SYLLABLE_LEN: usize = 6;

/// Every legal untoned syllable. `ü` is written `v`.
pub const LEGAL_SYLLABLES: &[&str] = &[
    "a", "ai", "an", "ang", "ao", "ba", "bai", "ban", "bang", "bao", "bei", "ben", "beng", "bi",
    "bian", "biao", "bie", "bin", "bing", "bo", "bu", "ca", "cai", "can", "cang", "cao", "ce",
    "cen", "ceng", "cha", "chai", "chan", "chang", "chao", "che", "chen", "cheng", "chi", "chong",
    "chou", "chu", "chua", "chuai", "chuan", "chuang", "chui", "chun", "chuo", "ci", "cong", "cou",
    "cu", "cuan", "cui", "cun", "cuo", "da", "dai", "dan", "dang", "dao", "de", "dei", "den",
    "deng", "di", "dia", "dian", "diao", "die", "ding", "diu", "dong", "dou", "du", "duan", "dui",
    "dun", "duo", "e", "ei", "en", "eng", "er", "fa", "fan", "fang", "fei", "fen", "feng", "fo",
    "fou", "fu", "ga", "gai", "gan", "gang", "gao", "ge", "gei", "gen", "geng", "gong", "gou",
    "gu", "gua", "guai", "guan", "guang", "gui", "gun", "guo", "ha", "hai", "han", "hang", "hao",
    "he", "hei", "hen", "heng", "hong", "hou", "hu", "hua", "huai", "huan", "huang", "hui", "hun",
    "huo", "ji", "jia", "jian", "jiang", "jiao", "jie", "jin", "jing", "jiong", "jiu", "ju",
    "juan", "jue", "jun", "ka", "kai", "kan", "kang", "kao", "ke", "kei", "ken", "keng", "kong",
    "kou", "ku", "kua", "kuai", "kuan", "kuang", "kui", "kun", "kuo", "la", "lai", "lan", "lang",
    "lao", "le", "lei", "leng", "li", "lia", "lian", "liang", "liao", "lie", "lin", "ling", "liu",
    "lo", "long", "lou", "lu", "luan", "lun", "luo", "lv", "lve", "ma", "mai", "man", "mang",
    "mao", "me", "mei", "men", "meng", "mi", "mian", "miao", "mie", "min", "ming", "miu", "mo",
    "mou", "mu", "na", "nai", "nan", "nang", "nao", "ne", "nei", "nen", "neng", "ng", "ni", "nian",
    "niang", "niao", "nie", "nin", "ning", "niu", "nong", "nou", "nu", "nuan", "nuo", "nv", "nve",
    "o", "ou", "pa", "pai", "pan", "pang", "pao", "pei", "pen", "peng", "pi", "pian", "piao",
    "pie", "pin", "ping", "po", "pou", "pu", "qi", "qia", "qian", "qiang", "qiao", "qie", "qin",
    "qing", "qiong", "qiu", "qu", "quan", "que", "qun", "ran", "rang", "rao", "re", "ren", "reng",
    "ri", "rong", "rou", "ru", "rua", "ruan", "rui", "run", "ruo", "sa", "sai", "san", "sang",
    "sao", "se", "sen", "seng", "sha", "shai", "shan", "shang", "shao", "she", "shei", "shen",
    "sheng", "shi", "shou", "shu", "shua", "shuai", "shuan", "shuang", "shui", "shun", "shuo",
    "si", "song", "sou", "su", "suan", "sui", "sun", "suo", "ta", "tai", "tan", "tang", "tao",
    "te", "ten", "teng", "ti", "tian", "tiao", "tie", "ting", "tong", "tou", "tu", "tuan", "tui",
    "tun", "tuo", "wa", "wai", "wan", "wang", "wei", "wen", "weng", "wo", "wu", "xi", "xia",
    "xian", "xiang", "xiao", "xie", "xin", "xing", "xiong", "xiu", "xu", "xuan", "xue", "xun",
    "ya", "yan", "yang", "yao", "ye", "yi", "yin", "ying", "yo", "yong", "you", "yu", "yuan",
    "yue", "yun", "za", "zai", "zan", "zang", "zao", "ze", "zei", "zen", "zeng", "zha", "zhai",
    "zhan", "zhang", "zhao", "zhe", "zhei", "zhen", "zheng", "zhi", "zhong", "zhou", "zhu", "zhua",
    "zhuai", "zhuan", "zhuang", "zhui", "zhun", "zhuo", "zi", "zong", "zou", "zu", "zuan", "zui",
    "zun", "zuo",
];

static LEGAL: Lazy<HashSet<&'static str>> = Lazy::new(|| LEGAL_SYLLABLES.iter().copied().collect());

static FINALS_BY_INITIAL: Lazy<HashMap<&'static str, Vec<&'static str>>> = Lazy::new(|| {
    let mut map: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
    for &syllable in LEGAL_SYLLABLES {
        let (initial, final_) = split_syllable(syllable);
        map.entry(initial).or_default().push(final_);
    }
    map
});

pub fn is_legal(syllable: &str) -> bool {
    LEGAL.contains(syllable)
}

pub fn is_initial(text: &str) -> bool {
    INITIALS.contains(&text)
}

/// Legal finals for an initial (`""` for zero-initial syllables), in table order.
pub fn finals_for(initial: &str) -> &'static [&'static str] {
    FINALS_BY_INITIAL
        .get(initial)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// Split an untoned syllable into initial and final.
///
/// The longest initial wins when the remainder is a known final; anything
/// else (`er`, `ng`, interjections like `hm`) is all final.
pub fn split_syllable(syllable: &str) -> (&str, &str) {
    for initial in INITIALS {
        if let Some(rest) = syllable.strip_prefix(initial)
            && FINALS.contains(&rest)
        {
            return (&syllable[..initial.len()], rest);
        }
    }
    ("", syllable)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splits_initials_and_finals() {
        assert_eq!(split_syllable("zhuang"), ("zh", "uang"));
        assert_eq!(split_syllable("zuo"), ("z", "uo"));
        assert_eq!(split_syllable("yuan"), ("y", "uan"));
        assert_eq!(split_syllable("er"), ("", "er"));
        assert_eq!(split_syllable("ng"), ("", "ng"));
        assert_eq!(split_syllable("lve"), ("l", "ve"));
        assert_eq!(split_syllable("a"), ("", "a"));
    }

    #[test]
    fn every_legal_syllable_splits_cleanly() {
        for syllable in LEGAL_SYLLABLES {
            let (initial, final_) = split_syllable(syllable);
            assert!(initial.is_empty() || is_initial(initial), "{syllable}");
            assert_eq!(format!("{initial}{final_}"), *syllable);
            assert!(syllable.len() <= MAX_SYLLABLE_LEN);
        }
    }

    #[test]
    fn finals_follow_the_legality_table() {
        let t = finals_for("t");
        assert!(t.contains(&"ian"));
        assert!(t.contains(&"a"));
        assert!(!t.contains(&"iang"));
        assert!(!t.contains(&"v"));
        assert!(finals_for("zh").contains(&"uang"));
        assert!(finals_for("").contains(&"er"));
        assert!(finals_for("v").is_empty());
    }
}
