use mailform::{Notice, NoticeKind};
use std::borrow::Cow;

#[derive(thiserror::Error, Debug, Notice)]
enum UploadError {
    #[error("upload finished")]
    #[notice(Success)]
    Done,

    #[error("quota exceeded")]
    #[notice(Error)]
    Quota,

    #[error("bad request: {0}")]
    BadRequest(Cow<'static, str>),

    #[error("Found ({0}, {1})")]
    #[notice(Error, "num={0} string={1}")]
    CodeAndMessage(u32, String),

    #[error("Found ({f1}, {f2})")]
    #[notice(Error, "f1={f1} f2={f2}")]
    Fields { f1: &'static str, f2: &'static str },

    #[error("braces {0}")]
    #[notice(Error, "{{literal}} {0}")]
    Escaped(u8),

    #[error("io error: {0}")]
    #[notice(Error, "Something went wrong.")]
    Io(#[from] std::io::Error),
}

#[test]
fn test_notice_derive() {
    let done = UploadError::Done;
    assert_eq!(done.notice_kind(), NoticeKind::Success);
    assert_eq!(done.notice_message(), "upload finished");

    let quota = UploadError::Quota;
    assert_eq!(quota.notice_kind(), NoticeKind::Error);
    assert_eq!(quota.notice_message(), "quota exceeded");

    let bad_request = UploadError::BadRequest(Cow::Borrowed("Invalid request"));
    assert_eq!(bad_request.notice_kind(), NoticeKind::Error);
    assert_eq!(bad_request.notice_message(), "bad request: Invalid request");

    let code_and_message = UploadError::CodeAndMessage(42, "Answer".into());
    assert_eq!(code_and_message.notice_message(), "num=42 string=Answer");

    let fields = UploadError::Fields {
        f1: "fun",
        f2: "far",
    };
    assert_eq!(fields.notice_message(), "f1=fun f2=far");

    assert_eq!(UploadError::Escaped(7).notice_message(), "{literal} 7");

    let io = UploadError::from(std::io::Error::other("disk on fire"));
    assert_eq!(io.notice_message(), "Something went wrong.");
    assert_eq!(io.to_string(), "io error: disk on fire");
}
