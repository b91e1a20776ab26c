use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;
use strum_macros::EnumIter;

use crate::player::Player;

/// Allowed match lengths, persisted as the bare number of minutes
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, EnumIter,
)]
#[serde(try_from = "u32", into = "u32")]
pub enum MatchDuration {
    Six,
    Eight,
    #[default]
    Ten,
    Eleven,
    Twelve,
    Fifteen,
}

impl MatchDuration {
    pub fn minutes(self) -> u32 {
        match self {
            MatchDuration::Six => 6,
            MatchDuration::Eight => 8,
            MatchDuration::Ten => 10,
            MatchDuration::Eleven => 11,
            MatchDuration::Twelve => 12,
            MatchDuration::Fifteen => 15,
        }
    }

    pub fn as_duration(self) -> Duration {
        Duration::from_secs(u64::from(self.minutes()) * 60)
    }
}

impl TryFrom<u32> for MatchDuration {
    type Error = String;

    fn try_from(minutes: u32) -> Result<Self, Self::Error> {
        match minutes {
            6 => Ok(MatchDuration::Six),
            8 => Ok(MatchDuration::Eight),
            10 => Ok(MatchDuration::Ten),
            11 => Ok(MatchDuration::Eleven),
            12 => Ok(MatchDuration::Twelve),
            15 => Ok(MatchDuration::Fifteen),
            other => Err(format!("unsupported match duration: {other} minutes")),
        }
    }
}

impl From<MatchDuration> for u32 {
    fn from(duration: MatchDuration) -> Self {
        duration.minutes()
    }
}

impl fmt::Display for MatchDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} minutes", self.minutes())
    }
}

/// Which side of a head-to-head a player occupies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    PlayerOne,
    PlayerTwo,
}

/// Persisted match record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: String,
    pub player_one_id: String,
    pub player_two_id: String,
    pub player_one_score: u32,
    pub player_two_score: u32,
    pub duration: MatchDuration,
    pub date: DateTime<Utc>,
    pub complete: bool,
}

impl Match {
    /// Returns the side the player occupies, if they took part
    pub fn side_of(&self, player_id: &str) -> Option<Side> {
        if self.player_one_id == player_id {
            Some(Side::PlayerOne)
        } else if self.player_two_id == player_id {
            Some(Side::PlayerTwo)
        } else {
            None
        }
    }

    /// (own, opponent) goals from the point of view of `side`
    pub fn scores_for(&self, side: Side) -> (u32, u32) {
        match side {
            Side::PlayerOne => (self.player_one_score, self.player_two_score),
            Side::PlayerTwo => (self.player_two_score, self.player_one_score),
        }
    }

    pub fn total_goals(&self) -> u64 {
        u64::from(self.player_one_score) + u64::from(self.player_two_score)
    }

    /// Id of the player with more goals, `None` for a draw
    pub fn winner_id(&self) -> Option<&str> {
        match self.player_one_score.cmp(&self.player_two_score) {
            std::cmp::Ordering::Greater => Some(&self.player_one_id),
            std::cmp::Ordering::Less => Some(&self.player_two_id),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// A match that has not been assigned an id yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewMatch {
    pub player_one_id: String,
    pub player_two_id: String,
    pub player_one_score: u32,
    pub player_two_score: u32,
    pub duration: MatchDuration,
    pub date: DateTime<Utc>,
    pub complete: bool,
}

impl NewMatch {
    /// A freshly started match: both scores zero, not complete
    pub fn in_progress(
        player_one_id: String,
        player_two_id: String,
        duration: MatchDuration,
    ) -> Self {
        Self {
            player_one_id,
            player_two_id,
            player_one_score: 0,
            player_two_score: 0,
            duration,
            date: Utc::now(),
            complete: false,
        }
    }

    pub fn with_id(self, id: String) -> Match {
        Match {
            id,
            player_one_id: self.player_one_id,
            player_two_id: self.player_two_id,
            player_one_score: self.player_one_score,
            player_two_score: self.player_two_score,
            duration: self.duration,
            date: self.date,
            complete: self.complete,
        }
    }
}

/// A match joined with both of its player records
#[derive(Debug, Clone, PartialEq)]
pub struct MatchWithPlayers {
    pub record: Match,
    pub player_one: Player,
    pub player_two: Player,
}

impl MatchWithPlayers {
    /// Joins against the roster, substituting a placeholder for missing players
    pub fn resolve(record: Match, players: &[Player]) -> Self {
        let lookup = |id: &str| {
            players
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .unwrap_or_else(Player::unknown)
        };

        Self {
            player_one: lookup(&record.player_one_id),
            player_two: lookup(&record.player_two_id),
            record,
        }
    }

    /// Winner's name, or "Draw"
    pub fn result_label(&self) -> &str {
        match self.record.winner_id() {
            Some(id) if id == self.record.player_one_id => &self.player_one.name,
            Some(_) => &self.player_two.name,
            None => "Draw",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn sample_match(one: u32, two: u32) -> Match {
        Match {
            id: "m-1".to_string(),
            player_one_id: "a".to_string(),
            player_two_id: "b".to_string(),
            player_one_score: one,
            player_two_score: two,
            duration: MatchDuration::Ten,
            date: Utc::now(),
            complete: true,
        }
    }

    #[rstest]
    #[case(6, MatchDuration::Six)]
    #[case(8, MatchDuration::Eight)]
    #[case(10, MatchDuration::Ten)]
    #[case(11, MatchDuration::Eleven)]
    #[case(12, MatchDuration::Twelve)]
    #[case(15, MatchDuration::Fifteen)]
    fn test_duration_accepts_supported_minutes(
        #[case] minutes: u32,
        #[case] expected: MatchDuration,
    ) {
        assert_eq!(MatchDuration::try_from(minutes), Ok(expected));
        assert_eq!(expected.as_duration(), Duration::from_secs(u64::from(minutes) * 60));
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(90)]
    fn test_duration_rejects_other_minutes(#[case] minutes: u32) {
        assert!(MatchDuration::try_from(minutes).is_err());
    }

    #[test]
    fn test_duration_set_has_six_entries() {
        assert_eq!(MatchDuration::iter().count(), 6);
        assert_eq!(MatchDuration::default(), MatchDuration::Ten);
    }

    #[test]
    fn test_match_decodes_camel_case_payload() {
        let raw = r#"{
            "id": "m-1",
            "playerOneId": "a",
            "playerTwoId": "b",
            "playerOneScore": 3,
            "playerTwoScore": 1,
            "duration": 12,
            "date": "2024-05-10T18:00:00.000Z",
            "complete": true
        }"#;
        let decoded: Match = serde_json::from_str(raw).unwrap();

        assert_eq!(decoded.duration, MatchDuration::Twelve);
        assert_eq!(decoded.player_one_score, 3);
        assert!(decoded.complete);
        assert_eq!(decoded.date.to_rfc3339(), "2024-05-10T18:00:00+00:00");
    }

    #[test]
    fn test_match_with_unknown_duration_fails_to_decode() {
        let raw = r#"{"id":"m","playerOneId":"a","playerTwoId":"b","playerOneScore":0,
            "playerTwoScore":0,"duration":9,"date":"2024-05-10T18:00:00Z","complete":false}"#;
        assert!(serde_json::from_str::<Match>(raw).is_err());
    }

    #[test]
    fn test_scores_for_each_side() {
        let record = sample_match(3, 1);

        assert_eq!(record.side_of("a"), Some(Side::PlayerOne));
        assert_eq!(record.side_of("b"), Some(Side::PlayerTwo));
        assert_eq!(record.side_of("c"), None);
        assert_eq!(record.scores_for(Side::PlayerOne), (3, 1));
        assert_eq!(record.scores_for(Side::PlayerTwo), (1, 3));
        assert_eq!(record.total_goals(), 4);
    }

    #[test]
    fn test_result_label_uses_names_and_draw() {
        let players = vec![
            Player::new("a".to_string(), "Alice".to_string()),
            Player::new("b".to_string(), "Bob".to_string()),
        ];

        let won = MatchWithPlayers::resolve(sample_match(2, 0), &players);
        let lost = MatchWithPlayers::resolve(sample_match(0, 2), &players);
        let drawn = MatchWithPlayers::resolve(sample_match(1, 1), &players);

        assert_eq!(won.result_label(), "Alice");
        assert_eq!(lost.result_label(), "Bob");
        assert_eq!(drawn.result_label(), "Draw");
    }

    #[test]
    fn test_resolve_substitutes_unknown_player() {
        let players = vec![Player::new("a".to_string(), "Alice".to_string())];
        let joined = MatchWithPlayers::resolve(sample_match(1, 0), &players);

        assert_eq!(joined.player_one.name, "Alice");
        assert_eq!(joined.player_two.id, "unknown");
        assert_eq!(joined.player_two.name, "Unknown Player");
    }
}
