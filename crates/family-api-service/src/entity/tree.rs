//! 家庭树与亲密度

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ColumnValue, Entity};

/// 家庭树
///
/// `watering` 为创建时的浇水时间，更新不会改变。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tree {
    pub id: i64,
    pub growth_stage: i64,
    pub quest: i64,
    pub watering: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TreePayload {
    pub growth_stage: i64,
    pub quest: i64,
}

impl Entity for Tree {
    const NAME: &'static str = "tree";
    const TABLE: &'static str = "trees";
    const PATH: &'static str = "trees";

    type Payload = TreePayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: TreePayload, now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            growth_stage: payload.growth_stage,
            quest: payload.quest,
            watering: now,
        }
    }

    fn apply(&mut self, payload: TreePayload, _now: DateTime<Utc>) {
        self.growth_stage = payload.growth_stage;
        self.quest = payload.quest;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("growth_stage", self.growth_stage.into()),
            ("quest", self.quest.into()),
            ("watering", self.watering.into()),
        ]
    }
}

/// 亲密度，挂在某棵家庭树下
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Closeness {
    pub id: i64,
    pub tree_id: i64,
    pub close_meter: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ClosenessPayload {
    pub tree_id: i64,
    pub close_meter: i64,
}

impl Entity for Closeness {
    const NAME: &'static str = "closeness";
    const TABLE: &'static str = "closeness";
    const PATH: &'static str = "closeness";

    type Payload = ClosenessPayload;

    fn id(&self) -> i64 {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = id;
    }

    fn from_payload(payload: ClosenessPayload, _now: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            tree_id: payload.tree_id,
            close_meter: payload.close_meter,
        }
    }

    fn apply(&mut self, payload: ClosenessPayload, _now: DateTime<Utc>) {
        self.tree_id = payload.tree_id;
        self.close_meter = payload.close_meter;
    }

    fn columns(&self) -> Vec<(&'static str, ColumnValue)> {
        vec![
            ("tree_id", self.tree_id.into()),
            ("close_meter", self.close_meter.into()),
        ]
    }
}

flat_view!(Tree, Closeness);

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_tree_watering_stamped_once() {
        let planted = Utc::now();
        let mut tree = Tree::from_payload(TreePayload { growth_stage: 1, quest: 0 }, planted);
        tree.apply(
            TreePayload { growth_stage: 2, quest: 3 },
            planted + Duration::days(1),
        );

        assert_eq!(tree.growth_stage, 2);
        assert_eq!(tree.quest, 3);
        assert_eq!(tree.watering, planted);
    }
}
