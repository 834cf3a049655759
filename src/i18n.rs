use serde::Deserialize;

/// Interface language. Persian is the studio's primary audience.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Fa,
    En,
}

/// Every user-visible string the gallery renders.
#[derive(Debug, Clone, Copy)]
pub struct Messages {
    pub lang: &'static str,
    pub dir: &'static str,
    pub empty_catalog: &'static str,
    pub type_video: &'static str,
    pub type_photo: &'static str,
    pub prev: &'static str,
    pub next: &'static str,
    pub download: &'static str,
    pub close: &'static str,
    pub project_not_found: &'static str,
    pub project_id_missing: &'static str,
    pub play_in_viewer: &'static str,
    pub open_new_tab: &'static str,
    pub request_collab: &'static str,
}

const FA: Messages = Messages {
    lang: "fa",
    dir: "rtl",
    empty_catalog: "هنوز نمونه‌کاری اضافه نشده.",
    type_video: "ویدیو",
    type_photo: "عکس",
    prev: "⟨ قبلی",
    next: "بعدی ⟩",
    download: "دانلود",
    close: "بستن ✕",
    project_not_found: "پروژه پیدا نشد.",
    project_id_missing: "شناسهٔ پروژه مشخص نیست.",
    play_in_viewer: "مشاهده در پلیر",
    open_new_tab: "باز کردن در تب جدید",
    request_collab: "درخواست همکاری",
};

const EN: Messages = Messages {
    lang: "en",
    dir: "ltr",
    empty_catalog: "No portfolio items yet.",
    type_video: "Video",
    type_photo: "Photo",
    prev: "⟨ Previous",
    next: "Next ⟩",
    download: "Download",
    close: "Close ✕",
    project_not_found: "Project not found.",
    project_id_missing: "No project id given.",
    play_in_viewer: "View in player",
    open_new_tab: "Open in new tab",
    request_collab: "Request a collaboration",
};

impl Locale {
    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Fa => &FA,
            Locale::En => &EN,
        }
    }
}
