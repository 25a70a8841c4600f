use thiserror::Error;
use diesel::prelude::*;
use crate::db::{post::models::*, schema::posts::dsl::*};

#[derive(Debug, Error)]
pub enum InsertPostError {
    #[error("InsertPost: {source}")]
    InsertPost{
        #[from]
        source: diesel::result::Error
    },
}

pub fn insert_post(
    conn: &mut PgConnection,
    new: &NewPost
) -> Result<Post, InsertPostError> {
    diesel::insert_into(posts)
        .values(new)
        .returning(Post::as_returning())
        .get_result(conn)
        .map_err(|source| InsertPostError::InsertPost{ source })
}

#[derive(Debug, Error)]
pub enum FindPostByTimestampError {
    #[error("FindPostByTimestamp: {source}")]
    FindPostByTimestamp{
        #[from]
        source: diesel::result::Error
    },
}

/// Exact match on the raw timestamp string as received from the feed.
pub fn find_post_by_timestamp(
    conn: &mut PgConnection,
    timestamp: &str
) -> Result<Option<Post>, FindPostByTimestampError> {
    posts
        .filter(post_at.eq(timestamp))
        .select(Post::as_select())
        .first(conn)
        .optional()
        .map_err(|source| FindPostByTimestampError::FindPostByTimestamp{ source })
}

#[derive(Debug, Error)]
pub enum GetPostsByMonthDayError {
    #[error("GetPostsByMonthDay: {source}")]
    GetPostsByMonthDay{
        #[from]
        source: diesel::result::Error
    },
}

/// `(url, year)` of every post published on `month_val`/`day_val`, newest year first.
pub fn get_posts_by_month_day(
    conn: &mut PgConnection,
    month_val: i32,
    day_val: i32
) -> Result<Vec<(String, i32)>, GetPostsByMonthDayError> {
    posts
        .filter(month.eq(month_val))
        .filter(day.eq(day_val))
        .select((url, year))
        .order_by(year.desc())
        .load::<(String, i32)>(conn)
        .map_err(|source| GetPostsByMonthDayError::GetPostsByMonthDay{ source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::establish_test_connection;
    use uuid::Uuid;

    fn new_post<'a>(timestamp: &'a str, media: &'a str, y: i32, m: i32, d: i32) -> NewPost<'a> {
        NewPost {
            id: Uuid::new_v4(),
            post_at: timestamp,
            url: media,
            caption: "",
            year: y,
            month: m,
            day: d,
        }
    }

    #[test]
    #[ignore = "requires a PostgreSQL DATABASE_URL with migrations applied"]
    fn finds_inserted_post_by_exact_timestamp() {
        let mut conn = establish_test_connection();

        conn.test_transaction::<_, diesel::result::Error, _>(|conn| {
            let stored = insert_post(conn, &new_post("2021-03-15T09:30:00+0000", "https://a/1.jpg", 2021, 3, 15)).unwrap();

            let found = find_post_by_timestamp(conn, "2021-03-15T09:30:00+0000").unwrap();
            assert_eq!(found.map(|p| p.id), Some(stored.id));

            let missing = find_post_by_timestamp(conn, "2021-03-15T09:30:01+0000").unwrap();
            assert!(missing.is_none());

            Ok(())
        });
    }

    #[test]
    #[ignore = "requires a PostgreSQL DATABASE_URL with migrations applied"]
    fn lists_posts_on_month_day_newest_year_first() {
        let mut conn = establish_test_connection();

        conn.test_transaction::<_, diesel::result::Error, _>(|conn| {
            insert_post(conn, &new_post("2019-03-15T10:00:00+0000", "https://a/2019.jpg", 2019, 3, 15)).unwrap();
            insert_post(conn, &new_post("2022-03-15T10:00:00+0000", "https://a/2022.jpg", 2022, 3, 15)).unwrap();
            insert_post(conn, &new_post("2021-03-16T10:00:00+0000", "https://a/other.jpg", 2021, 3, 16)).unwrap();
            insert_post(conn, &new_post("2020-04-15T10:00:00+0000", "https://a/april.jpg", 2020, 4, 15)).unwrap();

            let rows = get_posts_by_month_day(conn, 3, 15).unwrap();

            assert_eq!(
                rows,
                vec![
                    ("https://a/2022.jpg".to_string(), 2022),
                    ("https://a/2019.jpg".to_string(), 2019),
                ]
            );

            Ok(())
        });
    }
}
