//! Presentation boundary — renders the published state as terminal text.
//! Prints `CandidateView`s exactly as given; all normalization happened
//! upstream.

use crate::controller::{Phase, Published};
use crate::models::candidate::CandidateView;

pub const APP_TITLE: &str = "📄 智能简历筛选系统";
pub const APP_SUBTITLE: &str = "输入岗位名称和要求，系统将自动为您筛选最匹配的候选人。";

pub const IDLE_BLOCK: &str = "📋 暂无筛选结果，请填写岗位信息并开始筛选。
填写岗位信息后，开始筛选获取匹配结果";

pub const LOADING_BLOCK: &str = "🤖 正在智能分析简历，请稍候…
这可能需要一些时间，请耐心等待";

pub const NO_MATCH_BLOCK: &str = "🔍 未找到匹配的候选人
请尝试调整岗位要求或增加候选人数量";

pub const USAGE_GUIDE: &str = "📖 使用说明
1. 填写岗位信息
   • 输入岗位名称或从预设模板中选择
   • 设置需要返回的候选人数量
2. 编辑岗位要求
   • 详细描述岗位技能要求
   • 列出工作职责和经验要求
3. 开始筛选
   • 系统将智能分析并匹配候选人
4. 查看结果
   • 查看系统返回的候选人列表
   • 根据综合得分排序";

pub const RESULT_GUIDE: &str = "📈 结果解读
人才编号  候选人在人才库中的唯一标识符，可用于后续联系和跟进
得分      得分越高表示匹配度越高，基于大模型综合评估生成
经验年限  候选人的相关工作经验年限，自动从简历中提取
核心技能  候选人具备的核心技能，重点展示与岗位相关的技能
评分理由  系统生成的评估依据，解释候选人得分的具体原因";

/// The ranked candidate table, or the no-match block for an empty ranking.
pub fn results_block(results: &[CandidateView]) -> String {
    if results.is_empty() {
        return NO_MATCH_BLOCK.to_string();
    }

    let mut out = String::from("📊 候选人评分结果\n");
    for view in results {
        out.push_str(&candidate_row(view));
    }
    out
}

fn candidate_row(view: &CandidateView) -> String {
    format!(
        "────────────────────────────────────────\n\
         人才编号 {}    得分 {}    经验年限 {}\n\
         核心技能: {}\n\
         评分理由: {}\n",
        view.id, view.score, view.years_experience, view.core_skills, view.reasoning
    )
}

pub fn error_block(message: &str) -> String {
    format!("错误: {message}")
}

/// One text block per lifecycle phase, for callers that render the published
/// state wholesale.
pub fn render_published(published: &Published) -> String {
    match published.phase {
        Phase::Idle => IDLE_BLOCK.to_string(),
        Phase::Loading => LOADING_BLOCK.to_string(),
        Phase::Success => results_block(&published.results),
        Phase::Failed => published
            .error
            .as_deref()
            .map(error_block)
            .unwrap_or_else(|| error_block("未知错误")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view() -> CandidateView {
        CandidateView {
            id: 7,
            score: "91.20".to_string(),
            years_experience: "6.5年".to_string(),
            core_skills: "Python, 机器学习".to_string(),
            reasoning: "技术能力突出".to_string(),
        }
    }

    #[test]
    fn test_empty_ranking_renders_no_match_block() {
        assert_eq!(results_block(&[]), NO_MATCH_BLOCK);
    }

    #[test]
    fn test_table_carries_every_view_field() {
        let rendered = results_block(&[view()]);
        for needle in ["人才编号 7", "得分 91.20", "6.5年", "Python, 机器学习", "技术能力突出"] {
            assert!(rendered.contains(needle), "missing {needle}: {rendered}");
        }
    }

    #[test]
    fn test_error_block_carries_message() {
        let rendered = error_block("后端返回错误: 500 - boom");
        assert_eq!(rendered, "错误: 后端返回错误: 500 - boom");
    }

    #[test]
    fn test_render_published_matches_phase() {
        let failed = Published {
            phase: Phase::Failed,
            results: Vec::new(),
            error: Some("超时".to_string()),
        };
        assert_eq!(render_published(&failed), "错误: 超时");

        let success = Published {
            phase: Phase::Success,
            results: vec![view()],
            error: None,
        };
        assert!(render_published(&success).contains("候选人评分结果"));
    }
}
