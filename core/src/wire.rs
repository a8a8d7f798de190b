//! JSON shapes at the engine boundary.
//!
//! Inbound: a settlement request as the game screens send it. Scores
//! are kept as raw JSON text and checked for integrality here, before
//! anything reaches the engine, so an unparseable number is reported
//! against the entity it belongs to.
//!
//! Outbound: the results document the results store accepts,
//! `{ players: [{ playerName, score, amount, isTeamWon? }] }`, and a
//! game record wrapping it with an id and a date.

use crate::{
    assembler::Settlement,
    entity::{Entity, Grouping, Member, Mode},
    error::{SettleError, SettleResult},
    types::{Amount, Score},
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModeDoc {
    #[serde(default)]
    pub loser_pays: bool,
    #[serde(default)]
    pub grouping:   Grouping,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDoc {
    pub id:    String,
    #[serde(default)]
    pub score: Option<Box<RawValue>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntityDoc {
    pub id:      String,
    /// Required for players. For teams, optional and checked against
    /// the member total when present.
    #[serde(default)]
    pub score:   Option<Box<RawValue>>,
    #[serde(default)]
    pub members: Vec<MemberDoc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettlementRequestDoc {
    pub entities:     Vec<EntityDoc>,
    pub total_amount: i64,
    #[serde(default)]
    pub mode:         ModeDoc,
}

impl Default for ModeDoc {
    fn default() -> Self {
        Self { loser_pays: false, grouping: Grouping::Individual }
    }
}

impl SettlementRequestDoc {
    pub fn from_json(json: &str) -> SettleResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn mode(&self) -> Mode {
        Mode { loser_pays: self.mode.loser_pays, grouping: self.mode.grouping }
    }

    /// Convert to engine entities, rejecting non-integer scores.
    pub fn to_entities(&self) -> SettleResult<Vec<Entity>> {
        self.entities.iter().map(entity_from_doc).collect()
    }
}

fn entity_from_doc(doc: &EntityDoc) -> SettleResult<Entity> {
    if doc.members.is_empty() {
        let score = required_score(&doc.id, doc.score.as_deref())?;
        return Ok(Entity::player(doc.id.clone(), score));
    }

    let members = doc
        .members
        .iter()
        .map(|m| {
            Ok(Member {
                id: m.id.clone(),
                score: required_score(&m.id, m.score.as_deref())?,
            })
        })
        .collect::<SettleResult<Vec<_>>>()?;
    let mut team = Entity::team(doc.id.clone(), members);
    if let Some(n) = &doc.score {
        // Keep the declared total; the engine compares it to the members.
        team.score = integer_score(&doc.id, n)?;
    }
    Ok(team)
}

fn required_score(id: &str, raw: Option<&RawValue>) -> SettleResult<Score> {
    raw.ok_or_else(|| SettleError::MissingScore { id: id.to_string() })
        .and_then(|raw| integer_score(id, raw))
}

/// Accept JSON integers and floats with no fractional part.
fn integer_score(id: &str, raw: &RawValue) -> SettleResult<Score> {
    let text = raw.get().trim();
    if let Ok(v) = text.parse::<Score>() {
        return Ok(v);
    }
    let non_integer = || SettleError::NonIntegerScore { id: id.to_string(), raw: text.to_string() };
    if !text.starts_with(|c: char| c == '-' || c.is_ascii_digit()) {
        return Err(non_integer());
    }
    let v: f64 = text.parse().map_err(|_| non_integer())?;
    if v.is_finite() && v.fract() == 0.0 && v >= i64::MIN as f64 && v < i64::MAX as f64 {
        Ok(v as Score)
    } else {
        Err(non_integer())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ResultRow {
    pub player_name: String,
    pub score:       Score,
    pub amount:      Amount,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_team_won: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResultsDocument {
    pub players: Vec<ResultRow>,
}

impl ResultsDocument {
    pub fn from_settlement(settlement: &Settlement) -> Self {
        let players = settlement
            .allocations
            .iter()
            .map(|a| ResultRow {
                player_name: a.entity_id.clone(),
                score: a.score,
                amount: a.amount,
                is_team_won: a.team_won,
            })
            .collect();
        Self { players }
    }

    pub fn to_json(&self) -> SettleResult<String> {
        Ok(serde_json::to_string(self)?)
    }
}

/// A finished game as handed to the results store.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_id:   Uuid,
    pub played_at: DateTime<Utc>,
    #[serde(flatten)]
    pub results:   ResultsDocument,
}

impl GameRecord {
    /// Caller supplies the timestamp; nothing here reads the clock.
    pub fn new(settlement: &Settlement, played_at: DateTime<Utc>) -> Self {
        Self {
            game_id: Uuid::new_v4(),
            played_at,
            results: ResultsDocument::from_settlement(settlement),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn fractional_scores_are_rejected() {
        let doc = SettlementRequestDoc::from_json(
            r#"{ "entities": [ {"id":"A","score":1.5}, {"id":"B","score":2} ], "totalAmount": 100 }"#,
        )
        .unwrap();
        let err = doc.to_entities().unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert!(matches!(err, SettleError::NonIntegerScore { ref id, .. } if id == "A"));
    }

    #[test]
    fn whole_floats_are_accepted() {
        let doc = SettlementRequestDoc::from_json(
            r#"{ "entities": [ {"id":"A","score":80.0}, {"id":"B","score":-20} ], "totalAmount": 100 }"#,
        )
        .unwrap();
        let entities = doc.to_entities().unwrap();
        assert_eq!(entities[0].score, 80);
        assert_eq!(entities[1].score, -20);
    }

    #[test]
    fn missing_score_has_its_own_error() {
        let doc = SettlementRequestDoc::from_json(
            r#"{ "entities": [ {"id":"A"}, {"id":"B","score":2} ], "totalAmount": 100 }"#,
        )
        .unwrap();
        let err = doc.to_entities().unwrap_err();
        assert!(matches!(err, SettleError::MissingScore { ref id } if id == "A"));
        assert_eq!(err.kind(), ErrorKind::Validation);

        let doc = SettlementRequestDoc::from_json(
            r#"{ "entities": [ {"id":"T1","members":[{"id":"Asha"}]}, {"id":"T2","members":[{"id":"Ravi","score":1}]} ], "totalAmount": 100 }"#,
        )
        .unwrap();
        assert!(matches!(
            doc.to_entities(),
            Err(SettleError::MissingScore { ref id }) if id == "Asha"
        ));
    }

    #[test]
    fn out_of_range_and_non_numeric_scores_are_validation_errors() {
        for raw in ["1e400", "99999999999999999999", "\"7\"", "true"] {
            let json = format!(
                r#"{{ "entities": [ {{"id":"A","score":{raw}}}, {{"id":"B","score":2}} ], "totalAmount": 100 }}"#
            );
            let doc = SettlementRequestDoc::from_json(&json).unwrap();
            let err = doc.to_entities().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::Validation, "score {raw}: {err}");
            assert!(
                matches!(err, SettleError::NonIntegerScore { ref id, .. } if id == "A"),
                "score {raw}: {err}"
            );
        }
    }

    #[test]
    fn team_request_parses_grouping_and_members() {
        let doc = SettlementRequestDoc::from_json(
            r#"{
                "entities": [
                    {"id":"Team 1","members":[{"id":"Asha","score":4},{"id":"Ravi","score":3}]},
                    {"id":"Team 2","members":[{"id":"Meera","score":1},{"id":"Kiran","score":2}]}
                ],
                "totalAmount": 200,
                "mode": {"loserPays": true, "grouping": "team"}
            }"#,
        )
        .unwrap();
        assert_eq!(doc.mode(), Mode::team().with_loser_pays(true));
        let entities = doc.to_entities().unwrap();
        assert_eq!(entities[0].score, 7);
        assert_eq!(entities[1].members[1].id, "Kiran");
    }

    #[test]
    fn results_document_uses_store_field_names() {
        let row = ResultRow {
            player_name: "Asha".into(),
            score: 12,
            amount: 40,
            is_team_won: None,
        };
        let json = ResultsDocument { players: vec![row] }.to_json().unwrap();
        assert_eq!(json, r#"{"players":[{"playerName":"Asha","score":12,"amount":40}]}"#);
    }
}
