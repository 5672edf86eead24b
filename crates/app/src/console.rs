use mastery_core::model::{MasteryBuckets, Recommendation, WeakTopic};
use services::{
    DashboardRenderer, DownloadItem, LeaderboardEntry, QuizView, TestScore, ToastTone,
};

/// Plain-text renderer for the terminal host. Each hook maps to one
/// dashboard section of the original page.
pub struct ConsoleRenderer;

impl DashboardRenderer for ConsoleRenderer {
    fn render_recommendation(&self, recommendation: &Recommendation) {
        println!();
        println!(
            "Next up: {} ({})",
            recommendation.next_topic, recommendation.estimated_completion
        );
        for (i, day) in recommendation.daily_plan.iter().enumerate() {
            println!("  {}. {day}", i + 1);
        }
    }

    fn render_progress_chart(&self, buckets: MasteryBuckets) {
        println!(
            "Progress: {} mastered / {} good / {} need work",
            buckets.mastered, buckets.good, buckets.needs_work
        );
    }

    fn render_weak_topics(&self, weak: &[WeakTopic]) {
        if weak.is_empty() {
            println!("No weak topics! Keep the momentum.");
            return;
        }
        println!("Weak topics:");
        for topic in weak {
            println!("  {} - {}%", topic.label, topic.score);
        }
    }

    fn render_streak(&self, streak: u32) {
        println!("🔥 {streak} day streak");
    }

    fn render_downloads(&self, items: &[DownloadItem]) {
        if items.is_empty() {
            println!("Downloads: none yet");
            return;
        }
        println!("Downloads:");
        for item in items {
            println!("  {}", item.resource_name);
        }
    }

    fn render_test_scores(&self, scores: &[TestScore]) {
        if scores.is_empty() {
            println!("Recent tests: none yet");
            return;
        }
        println!("Recent tests:");
        for entry in scores {
            println!("  {}: {:.0}%", entry.topic_name, entry.score);
        }
    }

    fn render_leaderboard(&self, entries: &[LeaderboardEntry]) {
        if entries.is_empty() {
            return;
        }
        println!("Leaderboard:");
        for entry in entries {
            println!(
                "  #{} {} - {} XP ({} day streak)",
                entry.rank, entry.name, entry.xp, entry.streak
            );
        }
    }

    fn set_dark_mode(&self, enabled: bool) {
        if enabled {
            println!("(dark mode)");
        }
    }

    fn show_quiz_modal(&self, quiz: &QuizView) {
        println!();
        println!("{} Quiz", quiz.topic_name);
        for (i, question) in quiz.questions.iter().enumerate() {
            println!("Q{}. {}", i + 1, question.text);
            for (j, option) in question.options.iter().enumerate() {
                println!("   [{j}] {option}");
            }
        }
    }

    fn close_quiz_modal(&self) {
        println!();
    }

    fn show_toast(&self, message: &str, tone: ToastTone) {
        let marker = match tone {
            ToastTone::Success => "✔",
            ToastTone::Warning => "!",
            ToastTone::Info => "i",
        };
        println!("[{marker}] {message}");
    }

    fn navigate_to_topic(&self, topic_name: &str) {
        println!("Open the subject page for: {topic_name}");
    }
}
