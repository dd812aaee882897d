use reqwest::multipart;

use crate::{Attachment, Field, FormState, SubmitError};

/// Name of the multipart part carrying the attachment.
pub const ATTACHMENT_PART: &str = "attachment";

/// Everything that goes into one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub from: String,
    pub to: String,
    pub subject: String,
    pub text: String,
    pub attachment: Option<Attachment>,
}

impl Payload {
    pub fn new(state: &FormState, attachment: Option<&Attachment>) -> Self {
        Payload {
            from: state.from.clone(),
            to: state.to.clone(),
            subject: state.subject.clone(),
            text: state.text.clone(),
            attachment: attachment.cloned(),
        }
    }

    fn fields(&self) -> [(Field, &str); 4] {
        [
            (Field::From, self.from.as_str()),
            (Field::To, self.to.as_str()),
            (Field::Subject, self.subject.as_str()),
            (Field::Text, self.text.as_str()),
        ]
    }

    /// Names of the parts in the order they are written.
    pub fn part_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.fields().iter().map(|(field, _)| field.as_str()).collect();
        if self.attachment.is_some() {
            names.push(ATTACHMENT_PART);
        }
        names
    }

    /// Builds the `multipart/form-data` body, keeping the attachment's file name and type.
    pub fn into_form(self) -> Result<multipart::Form, SubmitError> {
        let mut form = multipart::Form::new();
        for (field, value) in self.fields() {
            form = form.text(field.as_str(), value.to_owned());
        }

        if let Some(attachment) = self.attachment {
            let part = multipart::Part::bytes(attachment.content().to_vec())
                .file_name(attachment.name().to_owned())
                .mime_str(attachment.mime_type())?;
            form = form.part(ATTACHMENT_PART, part);
        }

        Ok(form)
    }
}
