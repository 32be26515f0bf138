table! {
    article_tags (article_id, tag_id) {
        article_id -> Int4,
        tag_id -> Int4,
    }
}

table! {
    articles (id) {
        id -> Int4,
        slug -> Text,
        title -> Text,
        description -> Text,
        body -> Text,
        author_id -> Int4,
        created_at -> Timestamp,
        updated_at -> Nullable<Timestamp>,
    }
}

table! {
    comments (id) {
        id -> Int4,
        body -> Text,
        author_id -> Int4,
        article_id -> Int4,
        created_at -> Timestamp,
    }
}

table! {
    favorites (user_id, article_id) {
        user_id -> Int4,
        article_id -> Int4,
    }
}

table! {
    follows (follower_id, followee_id) {
        follower_id -> Int4,
        followee_id -> Int4,
    }
}

table! {
    tags (id) {
        id -> Int4,
        name -> Text,
    }
}

table! {
    users (id) {
        id -> Int4,
        username -> Varchar,
        email -> Text,
        password -> Text,
        bio -> Nullable<Text>,
        image -> Nullable<Text>,
        created_at -> Timestamp,
    }
}
