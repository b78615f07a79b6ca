//! Schemas for every request body, slug set, query string and response
//! payload the API uses.

use super::{Field, IdPrefix, Rule, Schema, Unknown};
use crate::pagination::{DEFAULT_LIMIT, DEFAULT_OFFSET, MAX_LIMIT};

/// Must be present, may not be null.
macro_rules! required {
    ($name:literal, $rule:expr) => {
        Field {
            name: $name,
            rule: $rule,
            required: true,
            nullable: false,
        }
    };
}

/// Must be present, may be null.
macro_rules! nullable {
    ($name:literal, $rule:expr) => {
        Field {
            name: $name,
            rule: $rule,
            required: true,
            nullable: true,
        }
    };
}

/// May be absent or null.
macro_rules! optional {
    ($name:literal, $rule:expr) => {
        Field {
            name: $name,
            rule: $rule,
            required: false,
            nullable: true,
        }
    };
}

macro_rules! schema {
    ($name:literal, $unknown:expr, [$($field:expr),* $(,)?]) => {
        Schema {
            name: $name,
            fields: &[$($field),*],
            unknown: $unknown,
            exactly_one_of: &[],
        }
    };
}

// --- field rules --- //

const PROJECT_NAME: Rule = Rule::Str { min: 1, max: 32 };
const USERNAME: Rule = Rule::Str { min: 1, max: 32 };
const FEED_NAME: Rule = Rule::Str { min: 1, max: 24 };
const FEED_DESCRIPTION: Rule = Rule::Str { min: 1, max: 128 };
const LOG_TITLE: Rule = Rule::Str { min: 1, max: 32 };
const LOG_DESCRIPTION: Rule = Rule::Str { min: 1, max: 4096 };
const INSIGHT_TITLE: Rule = Rule::Str { min: 1, max: 32 };
const INSIGHT_DESCRIPTION: Rule = Rule::Str { min: 1, max: 128 };
const EMOJI: Rule = Rule::Str { min: 1, max: 32 };

// --- slugs --- //

pub static NAMESPACE_SLUGS: Schema =
    schema!("NamespaceSlugs", Unknown::Raise, [required!("namespace", Rule::Namespace)]);

pub static MEMBER_SLUGS: Schema = schema!(
    "MemberSlugs",
    Unknown::Raise,
    [
        required!("namespace", Rule::Namespace),
        required!("username", USERNAME),
    ]
);

pub static FEED_SLUGS: Schema = schema!(
    "FeedSlugs",
    Unknown::Raise,
    [
        required!("namespace", Rule::Namespace),
        required!("feed", FEED_NAME),
    ]
);

pub static LOG_SLUGS: Schema = schema!(
    "LogSlugs",
    Unknown::Raise,
    [
        required!("namespace", Rule::Namespace),
        required!("feed", FEED_NAME),
        required!("log_id", Rule::Id(IdPrefix::Log)),
    ]
);

pub static INSIGHT_SLUGS: Schema = schema!(
    "InsightSlugs",
    Unknown::Raise,
    [
        required!("namespace", Rule::Namespace),
        required!("insight_id", Rule::Id(IdPrefix::Insight)),
    ]
);

// --- query strings --- //

pub static PAGINATION_QUERY: Schema = schema!(
    "PaginationQuery",
    Unknown::Raise,
    [
        required!(
            "limit",
            Rule::Int {
                min: 1,
                max: Some(MAX_LIMIT as i64),
                default: Some(DEFAULT_LIMIT as i64),
            }
        ),
        required!(
            "offset",
            Rule::Int {
                min: 0,
                max: None,
                default: Some(DEFAULT_OFFSET as i64),
            }
        ),
    ]
);

// --- request bodies --- //

pub static PROJECT_CREATE_BODY: Schema = schema!(
    "ProjectCreateBody",
    Unknown::Raise,
    [
        required!("name", PROJECT_NAME),
        required!("namespace", Rule::Namespace),
    ]
);

pub static PROJECT_PATCH_BODY: Schema =
    schema!("ProjectPatchBody", Unknown::Raise, [required!("name", PROJECT_NAME)]);

pub static FEED_CREATE_BODY: Schema = schema!(
    "FeedCreateBody",
    Unknown::Raise,
    [
        required!("name", FEED_NAME),
        optional!("description", FEED_DESCRIPTION),
        optional!("emoji", EMOJI),
    ]
);

pub static FEED_PATCH_BODY: Schema = schema!(
    "FeedPatchBody",
    Unknown::Raise,
    [
        optional!("name", FEED_NAME),
        optional!("description", FEED_DESCRIPTION),
        optional!("emoji", EMOJI),
    ]
);

pub static LOG_CREATE_BODY: Schema = schema!(
    "LogCreateBody",
    Unknown::Raise,
    [
        required!("title", LOG_TITLE),
        optional!("description", LOG_DESCRIPTION),
        optional!("emoji", EMOJI),
        optional!("tags", Rule::Tags),
        optional!("timestamp", Rule::DateTime),
        optional!("notify", Rule::Bool),
    ]
);

pub static LOG_PATCH_BODY: Schema = schema!(
    "LogPatchBody",
    Unknown::Raise,
    [
        optional!("title", LOG_TITLE),
        optional!("description", LOG_DESCRIPTION),
        optional!("emoji", EMOJI),
        optional!("tags", Rule::Tags),
        optional!("timestamp", Rule::DateTime),
    ]
);

pub static INSIGHT_CREATE_BODY: Schema = schema!(
    "InsightCreateBody",
    Unknown::Raise,
    [
        required!("title", INSIGHT_TITLE),
        optional!("description", INSIGHT_DESCRIPTION),
        optional!("emoji", EMOJI),
        optional!("value", Rule::Float),
    ]
);

/// `{"set": n}` or `{"increment": n}`, never both.
pub static INSIGHT_VALUE: Schema = Schema {
    name: "InsightValue",
    fields: &[
        optional!("set", Rule::Float),
        optional!("increment", Rule::Float),
    ],
    unknown: Unknown::Raise,
    exactly_one_of: &["set", "increment"],
};

pub static INSIGHT_PATCH_BODY: Schema = schema!(
    "InsightPatchBody",
    Unknown::Raise,
    [
        optional!("title", INSIGHT_TITLE),
        optional!("description", INSIGHT_DESCRIPTION),
        optional!("emoji", EMOJI),
        optional!("value", Rule::Nested(&INSIGHT_VALUE)),
    ]
);

// --- responses --- //

pub static FEED: Schema = schema!(
    "Feed",
    Unknown::Exclude,
    [
        required!("id", Rule::Id(IdPrefix::Feed)),
        required!("project_id", Rule::Id(IdPrefix::Project)),
        required!("name", FEED_NAME),
        nullable!("description", FEED_DESCRIPTION),
        nullable!("emoji", EMOJI),
    ]
);

pub static MEMBER: Schema = schema!(
    "Member",
    Unknown::Exclude,
    [
        required!("id", Rule::Id(IdPrefix::User)),
        required!("username", Rule::Text),
        nullable!("icon", Rule::Text),
    ]
);

pub static PROJECT: Schema = schema!(
    "Project",
    Unknown::Exclude,
    [
        required!("id", Rule::Id(IdPrefix::Project)),
        required!("namespace", Rule::Namespace),
        required!("name", PROJECT_NAME),
        required!(
            "flags",
            Rule::Int {
                min: i64::MIN,
                max: None,
                default: None,
            }
        ),
        nullable!("icon", Rule::Text),
        required!("feeds", Rule::List(&FEED)),
        required!("members", Rule::List(&MEMBER)),
    ]
);

pub static LOG: Schema = schema!(
    "Log",
    Unknown::Exclude,
    [
        required!("id", Rule::Id(IdPrefix::Log)),
        required!("project_id", Rule::Id(IdPrefix::Project)),
        required!("feed_id", Rule::Id(IdPrefix::Feed)),
        required!("title", LOG_TITLE),
        nullable!("description", LOG_DESCRIPTION),
        nullable!("emoji", EMOJI),
    ]
);

pub static INSIGHT: Schema = schema!(
    "Insight",
    Unknown::Exclude,
    [
        required!("id", Rule::Id(IdPrefix::Insight)),
        required!("title", INSIGHT_TITLE),
        nullable!("description", INSIGHT_DESCRIPTION),
        required!("value", Rule::Float),
        nullable!("emoji", EMOJI),
        nullable!("updated_at", Rule::DateTime),
        required!("created_at", Rule::DateTime),
    ]
);
