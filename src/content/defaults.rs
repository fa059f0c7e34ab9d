//! Built-in content pack.
//!
//! Reproduces the reference advisory copy: the qualifying diagnostic test,
//! the A/B/C answer set, the city registry with tier membership, and the
//! two staged report templates.

use once_cell::sync::Lazy;

use crate::domain::classification::RegistryEntry;

use super::pack::{AnswerSet, ContentPack, PromptCopy, TemplateSeed};

/// The built-in pack, constructed once.
pub static DEFAULT_PACK: Lazy<ContentPack> = Lazy::new(default_pack);

/// Builds the built-in content pack.
pub fn default_pack() -> ContentPack {
    ContentPack {
        prompts: PromptCopy {
            diagnostic: "(LAY 正在审视你的投资计划...)\n\n\
我是 LAY，你的风控参谋。在谈投资之前，先看你能不能过这关。\n\n\
**【智商税测试】**\n\
你是一个外行，想在二线城市老城区接手一家看起来装修还可以的转让店。\
房东说：“这店以前生意很好的，我就是累了想休息。”\n\
你的第一反应是？\n\n\
A. 捡漏了，装修省一大笔钱，赶紧签。\n\
B. 要求看过去三年的流水和OTA后台数据。\n\
C. 觉得有猫腻，但相信自己的运营能力能做起来。\n\n\
(请输入 A, B 或 C)"
                .to_string(),
            corrective: "别想糊弄过去。选 A, B 还是 C？这是你的真金白银。".to_string(),
            correct_feedback: "**勉强及格。** 但你知道流水可以造假吗？\
你知道OTA差评可以被“技术处理”吗？不过你至少没那么天真。"
                .to_string(),
            other_feedback: "**典型韭菜。** 选A的是给房东接盘装修垃圾的；\
选C的是患了“自信幻觉症”的。记住：好店不需要转让，转让的都是坑。"
                .to_string(),
            brief: "测试结束。现在告诉我，**你想在哪个城市，投资多少钱，做什么类型的酒店？** \
(例如：我想在长沙开一家以电竞为主题的酒店，预算200万)"
                .to_string(),
            report_header: "收到。识别城市：**{city}**\n\
判定等级：**{tier}** -> 调用 {template}\n\n\
正在根据“智商税破壁模型”检索 {city} 的竞品数据...\n\
正在调用“系统性废弃”模型优化成本结构...\n\n\
--------------------------------\n\
**《{city}酒店投资分析底稿》**"
                .to_string(),
            completion_ack: "《分析底稿》已全部输出完毕。本次风控推演到此结束，\
拿着底稿去跟房东谈判吧。"
                .to_string(),
            unknown_entity_label: "未知城市".to_string(),
        },
        answers: AnswerSet {
            options: vec!["A".to_string(), "B".to_string(), "C".to_string()],
            correct: "B".to_string(),
        },
        registry: vec![
            RegistryEntry::alias("北京", "上海"),
            RegistryEntry::plain("上海"),
            RegistryEntry::plain("长沙"),
        ],
        top_tier: vec![
            "北京".to_string(),
            "上海".to_string(),
            "广州".to_string(),
            "深圳".to_string(),
        ],
        templates: vec![
            TemplateSeed {
                key: "tier1".to_string(),
                label: "【一线城市高周转模板】".to_string(),
                tier: Some(crate::domain::classification::Tier::Tier1),
                groups: vec![
                    vec![
                        "### P1. 宏观环境与劝退预警\n\
**【反直觉判断】**\n\
你以为一线城市流量大就稳赚？错了。\
一线城市的物业成本会吃掉你对“高入住率”的全部幻想，\
回本周期模型必须按高周转、高坪效重算。"
                            .to_string(),
                        "### P2. 竞品密度与定价带\n\
三公里内的同档竞品密度决定你的定价权。\
一线城市的定价带是刚性的：你涨不上去，也降不下来。"
                            .to_string(),
                        "### P3. 物业与合规红线\n\
消防、特种行业许可、产权性质，任何一项有瑕疵都是一票否决。\n\n\
*(篇幅已达上限，系统已暂停。请输入“继续”查看 P4 财务测算表)*"
                            .to_string(),
                    ],
                    vec![
                        "### P4. 财务测算 (FMEA风控版)\n\
**【风险对冲分析】**\n\
你的回本周期模型建立在入住率 85% 的假设上。\
如果不幸遇到不可抗力（参考2020年），入住率跌至 40%，\
你的现金流能撑几个月？\n\n\
高周转模板下，现金储备低于 6 个月固定支出即为红色预警。"
                            .to_string(),
                    ],
                ],
            },
            TemplateSeed {
                key: "general".to_string(),
                label: "【通用生存模板】".to_string(),
                tier: None,
                groups: vec![
                    vec![
                        "### P1. 宏观环境与劝退预警\n\
**【反直觉判断】**\n\
你认为这是网红城市，流量大？错了。\
根据 2024 年文旅数据，过夜游客人均消费远低于你的客单价假设。"
                            .to_string(),
                        "### P2. 供给过剩核查\n\
二三线城市的酒店供给在 2023 年后集中释放，\
存量转让盘的“装修还可以”大多是上一轮亏损者留下的沉没成本。"
                            .to_string(),
                        "### P3. 成本结构优化\n\
正在调用“系统性废弃”模型：砍掉大堂吧、行政楼层和一切\
为面子服务的成本项。\n\n\
*(篇幅已达上限，系统已暂停。请输入“继续”查看 P4 财务测算表)*"
                            .to_string(),
                    ],
                    vec![
                        "### P4. 财务测算 (FMEA风控版)\n\
**【风险对冲分析】**\n\
你的回本周期模型建立在入住率 85% 的假设上。\
如果不幸遇到不可抗力（参考2020年），入住率跌至 40%，\
你的现金流能撑几个月？\n\n\
通用生存模板下，第一性指标是现金流存续月数，不是 RevPAR。"
                            .to_string(),
                    ],
                ],
            },
        ],
        fallback_template: "general".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_pack_has_three_options_with_b_correct() {
        let pack = default_pack();
        assert_eq!(pack.answers.options, vec!["A", "B", "C"]);
        assert_eq!(pack.answers.correct, "B");
    }

    #[test]
    fn default_pack_defines_both_reference_templates() {
        let pack = default_pack();
        let keys: Vec<&str> = pack.templates.iter().map(|t| t.key.as_str()).collect();
        assert!(keys.contains(&"tier1"));
        assert!(keys.contains(&"general"));
    }

    #[test]
    fn default_templates_pause_once_before_the_final_group() {
        for seed in default_pack().templates {
            assert_eq!(seed.groups.len(), 2, "template '{}'", seed.key);
        }
    }

    #[test]
    fn default_registry_aliases_beijing() {
        let pack = default_pack();
        let beijing = pack.registry.iter().find(|r| r.name == "北京").unwrap();
        assert_eq!(beijing.canonical.as_deref(), Some("上海"));
    }

    #[test]
    fn lazy_pack_matches_constructor() {
        assert_eq!(DEFAULT_PACK.answers.correct, default_pack().answers.correct);
    }
}
