//! Prompt text and sampling parameters for the DashScope calls.
//!
//! Everything user-visible is in Chinese, matching the dashboard. The
//! task prompt is salted with random subjects, a random seed, and a time
//! hint so repeated generations do not collapse onto the same tasks.

use rand::seq::SliceRandom;
use rand::Rng;
use studyquest_core::types::Timestamp;

// ---------------------------------------------------------------------------
// Sampling parameters
// ---------------------------------------------------------------------------

pub const TASK_TEMPERATURE: f32 = 0.95;
pub const TASK_MAX_TOKENS: u32 = 500;

pub const CHAT_TEMPERATURE: f32 = 0.7;
pub const CHAT_MAX_TOKENS: u32 = 1000;

pub const STORY_TEMPERATURE: f32 = 0.9;
pub const STORY_MAX_TOKENS: u32 = 1500;

// ---------------------------------------------------------------------------
// System prompts
// ---------------------------------------------------------------------------

/// Task generation persona. Demands a JSON array so [`crate::parse`] can
/// lift the tasks out of the reply.
pub const TASK_SYSTEM_PROMPT: &str = "你是一个专门为4年级学生设计学习任务的AI助手。请根据要求生成3个适合4年级学生的学习任务。每个任务应该：1) 适合4年级学生的认知水平 2) 有明确的完成标准 3) 包含学科类型 4) 任务描述简洁明了（不超过30字）5) 每次生成的任务必须与之前不同，要有创意和变化。请以JSON格式返回，格式为：[{\"text\": \"任务描述\", \"coins\": 金币数(10-16), \"difficulty\": \"简单/中等/困难\"}]";

/// Tutor chat persona.
pub const TUTOR_SYSTEM_PROMPT: &str = "你是一个专门为4年级学生提供学习辅导的AI导师。你的特点是：1) 语言亲切友好，像朋友一样 2) 用简单易懂的方式解释复杂概念 3) 鼓励学生，给予正面反馈 4) 根据4年级学生的认知水平调整回答难度 5) 可以辅导数学、语文、英语、科学等各科目。请用中文回答。";

/// Story creation persona.
pub const STORY_SYSTEM_PROMPT: &str = "你是一个专门为小学4年级学生创作故事的AI助手。请创作一个曲折离奇、引人入胜的故事。故事要求：1) 适合4年级学生的认知水平和理解能力 2) 情节曲折有趣，有悬念和转折 3) 主题积极向上，传递正能量 4) 语言生动有趣，容易理解 5) 故事长度控制在300-500字左右 6) 包含冒险、探索、友谊、勇气等元素 7) 用中文创作";

// ---------------------------------------------------------------------------
// Canned fallbacks
// ---------------------------------------------------------------------------

/// Tutor reply when the upstream call fails or returns nothing.
pub const TUTOR_FALLBACK_REPLY: &str = "抱歉，我暂时无法回答这个问题。";

/// Story text when the upstream call fails or returns nothing.
pub const STORY_FALLBACK: &str = "抱歉，无法生成故事。";

// ---------------------------------------------------------------------------
// User prompt builders
// ---------------------------------------------------------------------------

/// Subjects the task prompt rotates through.
pub const SUBJECTS: [&str; 11] = [
    "数学", "语文", "英语", "科学", "美术", "音乐", "体育", "阅读", "写作", "历史", "地理",
];

/// Build the salted task generation prompt: three random subjects, a
/// random seed, and the current time.
pub fn build_task_prompt(rng: &mut impl Rng, now: Timestamp) -> String {
    let mut subjects = SUBJECTS;
    subjects.shuffle(rng);
    let focus = subjects[..3].join("、");
    let seed: u32 = rng.random_range(0..10000);
    let time = now.format("%Y-%m-%d %H:%M:%S");

    format!(
        "请生成3个全新的适合4年级学生的学习任务。要求：1) 任务要有创意，不要重复常见的任务 \
         2) 本次重点关注这些学科：{focus} 3) 随机种子：{seed}，时间：{time}。\
         请生成与以往完全不同的新任务。"
    )
}

/// Build the story prompt, folding in the listener's request when given.
pub fn build_story_prompt(user_input: Option<&str>) -> String {
    match user_input.map(str::trim).filter(|s| !s.is_empty()) {
        Some(input) => format!(
            "请根据以下要求创作一个适合4年级学生的故事：\n\n用户的要求：{input}\n\n\
             请创作一个情节引人入胜、有悬念和转折、主题积极向上的故事。"
        ),
        None => "请为我创作一个适合4年级学生的曲折离奇的故事，要求情节引人入胜，\
                 有悬念和转折，主题积极向上。"
            .to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn task_prompt_carries_three_subjects_and_a_seed() {
        let mut rng = StdRng::seed_from_u64(9);
        let now = chrono::Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap();
        let prompt = build_task_prompt(&mut rng, now);

        let mentioned = SUBJECTS.iter().filter(|s| prompt.contains(**s)).count();
        assert!(mentioned >= 3, "prompt should name the focus subjects");
        assert!(prompt.contains("随机种子"));
        assert!(prompt.contains("2025-06-01"));
    }

    #[test]
    fn story_prompt_with_request_embeds_it() {
        let prompt = build_story_prompt(Some("一只会飞的猫"));
        assert!(prompt.contains("一只会飞的猫"));
    }

    #[test]
    fn blank_story_request_uses_the_default_ask() {
        let with_blank = build_story_prompt(Some("   "));
        let with_none = build_story_prompt(None);
        assert_eq!(with_blank, with_none);
        assert!(with_none.contains("曲折离奇"));
    }
}
