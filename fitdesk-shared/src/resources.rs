//! The content types managed through the console

use crate::schema::{FieldKind, FieldSpec, MediaAccept, MediaSpec, ResourceSchema};
use crate::urls;

pub static ABOUT: ResourceSchema = ResourceSchema {
    key: "about",
    label: "About Page",
    singular: "about page",
    endpoint: urls::ABOUT_ENDPOINT,
    collection_key: "about",
    singleton: true,
    read_only: false,
    fields: &[
        FieldSpec::new("heroDescription", "Hero Description", FieldKind::LongText)
            .at("hero.description")
            .wire("hero[description]")
            .in_table(),
        FieldSpec::image("heroBgImage", "Hero Background Image").at("hero.bgImage"),
        FieldSpec::image("qrImg", "QR Image").at("hero.qrImg"),
        FieldSpec::new("descriptionTexts", "Description Texts", FieldKind::TextList)
            .at("description.texts")
            .wire("description[texts][]"),
        FieldSpec::new(
            "descriptionImages",
            "Description Images",
            FieldKind::Media(MediaSpec {
                multiple: true,
                accept: MediaAccept::Image,
                clear_flag: None,
            }),
        )
        .at("description.images"),
        FieldSpec::new("trainerTexts", "Trainer Texts", FieldKind::TextList)
            .at("trainer.texts")
            .wire("trainer[texts][]"),
        FieldSpec::image("trainerImage", "Trainer Image").at("trainer.image"),
    ],
    title_field: "heroDescription",
};

pub static BLOG: ResourceSchema = ResourceSchema {
    key: "blogs",
    label: "Blogs",
    singular: "blog",
    endpoint: urls::BLOG_ENDPOINT,
    collection_key: "blogs",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("title", "Title").required().in_table(),
        FieldSpec::text("tag", "Tag").required().in_table(),
        FieldSpec::new("date", "Date", FieldKind::Date)
            .required()
            .in_table(),
        FieldSpec::new("time", "Read Time", FieldKind::Time).required(),
        FieldSpec::image("image", "Thumbnail Image"),
        FieldSpec::text("videoUrl", "Video URL"),
        FieldSpec::new("isTrending", "Trending", FieldKind::Flag).in_table(),
    ],
    title_field: "title",
};

pub static PRICING: ResourceSchema = ResourceSchema {
    key: "pricing",
    label: "Pricing Plans",
    singular: "pricing plan",
    endpoint: urls::PRICING_ENDPOINT,
    collection_key: "pricings",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("duration", "Duration").required().in_table(),
        FieldSpec::new("price", "Price", FieldKind::Number)
            .required()
            .in_table(),
        FieldSpec::new("features", "Features", FieldKind::TextList)
            .required()
            .in_table(),
        FieldSpec::new("isPopular", "Popular", FieldKind::Flag).in_table(),
    ],
    title_field: "duration",
};

pub static SPORTS: ResourceSchema = ResourceSchema {
    key: "sports",
    label: "Sports",
    singular: "sport",
    endpoint: urls::SPORTS_ENDPOINT,
    collection_key: "sports",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("title", "Title").required().in_table(),
        FieldSpec::image("image", "Image"),
    ],
    title_field: "title",
};

pub static CENTERS: ResourceSchema = ResourceSchema {
    key: "centers",
    label: "Centers",
    singular: "center",
    endpoint: urls::CENTERS_ENDPOINT,
    collection_key: "centers",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("title", "Title").required().in_table(),
        FieldSpec::text("location", "Location").required().in_table(),
        FieldSpec::image("image", "Image"),
    ],
    title_field: "title",
};

/// Schedules a program can be offered with
pub const PROGRAM_SCHEDULES: &[&str] = &[
    "7 Week · 5x/week",
    "5 Week · 4x/week",
    "6 Week · 6x/week",
    "4 Week · 3x/week",
    "3 Week · 5x/week",
    "4 Week · 4x/week",
];

pub static PROGRAMS: ResourceSchema = ResourceSchema {
    key: "programs",
    label: "Programs",
    singular: "program",
    endpoint: urls::PROGRAMS_ENDPOINT,
    collection_key: "programs",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("title", "Title").required().in_table(),
        FieldSpec::new("subtitle", "Schedule", FieldKind::Choice(PROGRAM_SCHEDULES))
            .required()
            .in_table(),
        FieldSpec::new(
            "image",
            "Image",
            FieldKind::Media(MediaSpec {
                multiple: false,
                accept: MediaAccept::Image,
                clear_flag: Some("removeImage"),
            }),
        ),
    ],
    title_field: "title",
};

pub static SERVICES: ResourceSchema = ResourceSchema {
    key: "services",
    label: "Services",
    singular: "service",
    endpoint: urls::SERVICES_ENDPOINT,
    collection_key: "services",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("title", "Title").required().in_table(),
        FieldSpec::image("image", "Image").at("imagePath"),
    ],
    title_field: "title",
};

pub static USER_STORIES: ResourceSchema = ResourceSchema {
    key: "user-stories",
    label: "User Stories",
    singular: "story",
    endpoint: urls::USER_STORIES_ENDPOINT,
    collection_key: "stories",
    singleton: false,
    read_only: false,
    fields: &[
        FieldSpec::text("name", "Name").required().in_table(),
        FieldSpec::text("title", "Title").required().in_table(),
        FieldSpec::image("image", "Image"),
        FieldSpec::image("bg", "Background Image"),
        FieldSpec::new(
            "video",
            "Video",
            FieldKind::Media(MediaSpec {
                multiple: false,
                accept: MediaAccept::Video,
                clear_flag: None,
            }),
        ),
    ],
    title_field: "title",
};

pub static USERS: ResourceSchema = ResourceSchema {
    key: "users",
    label: "Users",
    singular: "user",
    endpoint: urls::USERS_ENDPOINT,
    collection_key: "users",
    singleton: false,
    read_only: true,
    fields: &[
        FieldSpec::text("fullName", "Name").in_table(),
        FieldSpec::text("email", "Email").in_table(),
        FieldSpec::text("role", "Role").in_table(),
    ],
    title_field: "fullName",
};

/// The content types that can be edited, in navigation order
pub static MANAGED: &[&ResourceSchema] = &[
    &ABOUT,
    &BLOG,
    &PRICING,
    &SPORTS,
    &CENTERS,
    &PROGRAMS,
    &SERVICES,
    &USER_STORIES,
];

/// Every schema known to the console, in navigation order
pub static ALL: &[&ResourceSchema] = &[
    &USERS,
    &ABOUT,
    &BLOG,
    &PRICING,
    &SPORTS,
    &CENTERS,
    &PROGRAMS,
    &SERVICES,
    &USER_STORIES,
];

/// The schema served at the console route `key`
pub fn by_key(key: &str) -> Option<&'static ResourceSchema> {
    ALL.iter().copied().find(|s| s.key == key)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn keys_are_unique() {
        for (i, a) in ALL.iter().enumerate() {
            for b in ALL.iter().skip(i + 1) {
                assert_ne!(a.key, b.key);
            }
        }
    }

    #[test]
    fn title_fields_exist() {
        for schema in ALL {
            assert!(
                schema.field(schema.title_field).is_some(),
                "{} has no field {}",
                schema.key,
                schema.title_field
            );
        }
    }

    #[test]
    fn media_decides_multipart() {
        assert!(!PRICING.has_media());
        assert!(BLOG.has_media());
        assert!(ABOUT.has_media());
        assert_eq!(USER_STORIES.media_fields().count(), 3);
    }

    #[test]
    fn lookup_by_key() {
        assert_eq!(by_key("pricing"), Some(&PRICING));
        assert_eq!(by_key("user-stories"), Some(&USER_STORIES));
        assert!(by_key("settings").is_none());
    }

    #[test]
    fn item_endpoint_appends_id() {
        assert_eq!(PRICING.item_endpoint("abc"), "/pricing/abc");
        assert_eq!(USERS.item_endpoint("7"), "/auth/users/7");
    }
}
