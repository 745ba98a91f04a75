use crate::report::PlayerFinalTotal;

/// Orders final totals for presentation: highest rake first, then by player id.
#[derive(Debug, Default, Clone, Copy)]
pub struct ResultRanker;

impl ResultRanker {
    pub fn new() -> Self {
        Self
    }

    pub fn rank(&self, mut totals: Vec<PlayerFinalTotal>) -> Vec<PlayerFinalTotal> {
        totals.sort_by(|a, b| {
            b.total_rake
                .cmp(&a.total_rake)
                .then_with(|| a.player_id.cmp(&b.player_id))
        });
        totals
    }
}
