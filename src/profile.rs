use db::schema::{favorites, follows};

/// Directed edge: `follower_id` follows `followee_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Queryable, Insertable)]
#[table_name = "follows"]
pub struct Follow {
    pub follower_id: i32,
    pub followee_id: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Queryable, Insertable)]
#[table_name = "favorites"]
pub struct Favorite {
    pub user_id: i32,
    pub article_id: i32,
}
