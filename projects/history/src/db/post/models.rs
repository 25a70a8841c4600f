use uuid::Uuid;
use diesel::prelude::*;
use crate::db::schema::posts;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable)]
#[diesel(table_name = posts)]
pub struct Post {
    pub id: Uuid,
    pub post_at: String,
    pub url: String,
    pub caption: String,
    pub year: i32,
    pub month: i32,
    pub day: i32,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = posts)]
pub struct NewPost<'a> {
    pub id: Uuid,
    pub post_at: &'a str,
    pub url: &'a str,
    pub caption: &'a str,
    pub year: i32,
    pub month: i32,
    pub day: i32,
}
