//! Static per-pillar task catalog. Five candidates per pillar.

use crate::shared::Pillar;

/// Catalog entry a daily task is instantiated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskTemplate {
    pub title: &'static str,
    pub description: &'static str,
    pub duration_minutes: u16,
    pub points: u32,
}

const fn t(title: &'static str, description: &'static str, duration_minutes: u16, points: u32) -> TaskTemplate {
    TaskTemplate { title, description, duration_minutes, points }
}

/// Candidates per pillar.
pub const TASKS_PER_PILLAR: usize = 5;

const FINANCE: [TaskTemplate; TASKS_PER_PILLAR] = [
    t("Track Today's Spending", "Write down every purchase you made today, no matter how small.", 10, 20),
    t("Review One Subscription", "Pick one recurring charge and decide whether it is still worth it.", 10, 25),
    t("Move Money to Savings", "Transfer any amount, even a small one, into your savings account.", 5, 30),
    t("Check Your Balances", "Look at every account balance and note them in one place.", 10, 15),
    t("Plan Tomorrow's Meals on a Budget", "Plan tomorrow's food so you avoid impulse purchases.", 15, 20),
];

const MENTAL: [TaskTemplate; TASKS_PER_PILLAR] = [
    t("5-Minute Meditation", "Sit quietly and follow your breath for five minutes.", 5, 20),
    t("Gratitude Journal", "Write down three things you are grateful for today.", 10, 20),
    t("Digital Sunset", "Put screens away one hour before bed.", 60, 30),
    t("Box Breathing", "Breathe in for 4, hold for 4, out for 4, hold for 4. Repeat ten times.", 5, 15),
    t("Reach Out to a Friend", "Send a message or call someone you care about.", 15, 25),
];

const PHYSICAL: [TaskTemplate; TASKS_PER_PILLAR] = [
    t("Take a Brisk Walk", "Walk at a pace that raises your heart rate for 20 minutes.", 20, 30),
    t("Stretch Routine", "Do a full-body stretch, holding each position for 30 seconds.", 10, 20),
    t("Bodyweight Circuit", "Three rounds of squats, push-ups and planks.", 15, 40),
    t("Take the Stairs", "Skip the elevator every time today.", 5, 15),
    t("Early Bedtime", "Be in bed 30 minutes earlier than usual.", 30, 25),
];

const NUTRITION: [TaskTemplate; TASKS_PER_PILLAR] = [
    t("Drink 8 Glasses of Water", "Spread eight glasses of water across the day.", 5, 20),
    t("Eat a Vegetable with Every Meal", "Add at least one vegetable to each meal today.", 10, 25),
    t("Cook a Meal at Home", "Prepare one meal from whole ingredients.", 45, 40),
    t("Skip Sugary Drinks", "Replace soda and juice with water or tea for the day.", 5, 20),
    t("Mindful Eating", "Eat one meal without screens, chewing slowly.", 20, 15),
];

/// The fixed candidate list for `pillar`.
pub fn templates(pillar: Pillar) -> &'static [TaskTemplate; TASKS_PER_PILLAR] {
    match pillar {
        Pillar::Finance => &FINANCE,
        Pillar::Mental => &MENTAL,
        Pillar::Physical => &PHYSICAL,
        Pillar::Nutrition => &NUTRITION,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_pillar_has_five_distinct_tasks() {
        for p in Pillar::ALL {
            let list = templates(p);
            assert_eq!(list.len(), TASKS_PER_PILLAR);
            for (i, a) in list.iter().enumerate() {
                assert!(a.points > 0 && a.duration_minutes > 0);
                assert!(list.iter().skip(i + 1).all(|b| b.title != a.title));
            }
        }
    }
}
