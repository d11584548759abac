table! {
    user (id) {
        id -> Integer,
        username -> Text,
        email -> Text,
        password -> Text,
    }
}

table! {
    blog (id) {
        id -> Integer,
        title -> Text,
        body -> Text,
        public -> Bool,
        author_id -> Integer,
        created -> Timestamp,
        updated -> Timestamp,
    }
}

table! {
    comment (id) {
        id -> Integer,
        text -> Text,
        author_id -> Integer,
        blog_id -> Integer,
        created -> Timestamp,
        updated -> Timestamp,
    }
}

joinable!(blog -> user (author_id));
joinable!(comment -> user (author_id));
joinable!(comment -> blog (blog_id));

allow_tables_to_appear_in_same_query!(
    user,
    blog,
    comment,
);
