//! Submission validation
//!
//! The codec accepts any text. Field semantics are checked here, before a
//! submission is turned into a record:
//!
//! - **name**: required; CJK ideographs (U+4E00–U+9FA5), ASCII letters and
//!   whitespace only
//! - **phone**: required; ASCII digits, whitespace and `-` only, with 8 to 15
//!   digits once separators are removed
//! - **region**: required; one of [`TAIWAN_REGIONS`]
//! - **occupation**: required; one of [`OCCUPATION_TYPES`]
//!
//! Messages are user-facing and kept in the survey's language.

use crate::types::{Field, FieldError, Submission, SurveyError};

/// Taiwan counties and cities accepted as a region
pub const TAIWAN_REGIONS: [&str; 22] = [
    "台北市", "新北市", "桃園市", "台中市", "台南市", "高雄市", "基隆市", "新竹市", "新竹縣",
    "苗栗縣", "彰化縣", "南投縣", "雲林縣", "嘉義市", "嘉義縣", "屏東縣", "宜蘭縣", "花蓮縣",
    "台東縣", "澎湖縣", "金門縣", "連江縣",
];

/// Accepted occupation types
pub const OCCUPATION_TYPES: [&str; 3] = ["藥師", "藥助", "其他"];

const MSG_REQUIRED: &str = "此欄位為必填";
const MSG_NAME_CHARS: &str = "姓名只能包含中文、英文字母和空格";
const MSG_PHONE_CHARS: &str = "電話號碼只能包含數字、空格和連字號";
const MSG_PHONE_LENGTH: &str = "請輸入有效的電話號碼（8-15 位數字）";
const MSG_SELECT: &str = "請選擇一個選項";
const MSG_REGION: &str = "請選擇有效的地區";
const MSG_OCCUPATION: &str = "請選擇有效的職業類型";

const PHONE_DIGITS_MIN: usize = 8;
const PHONE_DIGITS_MAX: usize = 15;

fn is_name_char(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c) || c.is_ascii_alphabetic() || c.is_whitespace()
}

fn is_phone_separator(c: char) -> bool {
    c.is_whitespace() || c == '-'
}

/// Validate the name field
pub fn validate_name(name: &str) -> Option<FieldError> {
    if name.trim().is_empty() {
        Some(FieldError::new(Field::Name, MSG_REQUIRED))
    } else if !name.chars().all(is_name_char) {
        Some(FieldError::new(Field::Name, MSG_NAME_CHARS))
    } else {
        None
    }
}

/// Validate the phone field
pub fn validate_phone(phone: &str) -> Option<FieldError> {
    if phone.trim().is_empty() {
        return Some(FieldError::new(Field::Phone, MSG_REQUIRED));
    }

    if !phone
        .chars()
        .all(|c| c.is_ascii_digit() || is_phone_separator(c))
    {
        return Some(FieldError::new(Field::Phone, MSG_PHONE_CHARS));
    }

    let digits = phone.chars().filter(|&c| !is_phone_separator(c)).count();
    if !(PHONE_DIGITS_MIN..=PHONE_DIGITS_MAX).contains(&digits) {
        return Some(FieldError::new(Field::Phone, MSG_PHONE_LENGTH));
    }

    None
}

/// Validate the region field
pub fn validate_region(region: &str) -> Option<FieldError> {
    if region.is_empty() {
        Some(FieldError::new(Field::Region, MSG_SELECT))
    } else if !TAIWAN_REGIONS.contains(&region) {
        Some(FieldError::new(Field::Region, MSG_REGION))
    } else {
        None
    }
}

/// Validate the occupation field
pub fn validate_occupation(occupation: &str) -> Option<FieldError> {
    if occupation.is_empty() {
        Some(FieldError::new(Field::Occupation, MSG_SELECT))
    } else if !OCCUPATION_TYPES.contains(&occupation) {
        Some(FieldError::new(Field::Occupation, MSG_OCCUPATION))
    } else {
        None
    }
}

/// Collect every field error of a submission, in field order
pub fn validate_form(submission: &Submission) -> Vec<FieldError> {
    [
        validate_name(&submission.name),
        validate_phone(&submission.phone),
        validate_region(&submission.region),
        validate_occupation(&submission.occupation),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Validate a submission, failing with every field error at once
pub fn validate(submission: &Submission) -> Result<(), SurveyError> {
    let errors = validate_form(submission);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(SurveyError::validation(errors))
    }
}
