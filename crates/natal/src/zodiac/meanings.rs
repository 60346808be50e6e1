//! Fixed descriptive text for the twelve houses.

use crate::zodiac::signs::Locale;

const HOUSE_MEANINGS_EN: [&str; 12] = [
    "House 1: self and image, outward temperament and beginnings",
    "House 2: money and values, resources and security",
    "House 3: communication and learning, siblings and short trips",
    "House 4: home and roots, inner security and private life",
    "House 5: creativity and romance, children and self-expression",
    "House 6: work and health, daily routine and service",
    "House 7: partners and cooperation, contracts and projection",
    "House 8: shared resources and transformation, intimacy and risk",
    "House 9: higher education, philosophy and long journeys",
    "House 10: career and reputation, goals and public role",
    "House 11: community and aspirations, friends and networks",
    "House 12: the unconscious and healing, retreat and endings",
];

const HOUSE_MEANINGS_ZH: [&str; 12] = [
    "第1宫：自我与形象、外在气质与开端",
    "第2宫：金钱与价值、资源与安全感",
    "第3宫：沟通与学习、手足与短途",
    "第4宫：家庭与根基、内在安全与私域",
    "第5宫：创造与恋爱、子女与表达",
    "第6宫：工作与健康、日常与服务",
    "第7宫：伴侣与合作、契约与投射",
    "第8宫：共享与转化、亲密与风险",
    "第9宫：高等教育、哲思与远行",
    "第10宫：事业与名誉、目标与社会角色",
    "第11宫：社群与愿景、朋友与资源",
    "第12宫：潜意识与疗愈、隐退与结束",
];

/// Meaning of house `index` (1-based). `None` outside 1..=12.
pub fn house_meaning(index: u8, locale: Locale) -> Option<&'static str> {
    let slot = usize::from(index).checked_sub(1)?;
    match locale {
        Locale::En => HOUSE_MEANINGS_EN.get(slot).copied(),
        Locale::Zh => HOUSE_MEANINGS_ZH.get(slot).copied(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_house_meaning_lookup() {
        assert_eq!(house_meaning(1, Locale::Zh), Some("第1宫：自我与形象、外在气质与开端"));
        assert!(house_meaning(10, Locale::En).unwrap().starts_with("House 10:"));
        assert_eq!(house_meaning(0, Locale::En), None);
        assert_eq!(house_meaning(13, Locale::Zh), None);
    }

    #[test]
    fn test_every_house_has_text() {
        for i in 1..=12u8 {
            let en = house_meaning(i, Locale::En).unwrap();
            assert!(en.starts_with(&format!("House {i}:")));
            let zh = house_meaning(i, Locale::Zh).unwrap();
            assert!(zh.starts_with(&format!("第{i}宫")));
        }
    }
}
