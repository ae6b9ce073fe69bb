//! Blocking modal popup.
//!
//! The facade picks a button layout and maps the host's raw result code.
//! Only codes 1 (OK) and 2 (Cancel) have names; anything else the host
//! returns is carried through unchanged as [`PopupResult::Other`].

use serde::Serialize;

use crate::error::Result;

pub const CODE_OK: i32 = 1;
pub const CODE_CANCEL: i32 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonLayout {
    /// A single acknowledgement button.
    Ok,
    /// Acknowledgement plus cancel.
    OkCancel,
}

impl ButtonLayout {
    pub fn for_cancel(has_cancel_button: bool) -> Self {
        if has_cancel_button {
            ButtonLayout::OkCancel
        } else {
            ButtonLayout::Ok
        }
    }

    pub fn has_cancel(&self) -> bool {
        matches!(self, ButtonLayout::OkCancel)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupResult {
    Ok,
    Cancel,
    Other(i32),
}

impl PopupResult {
    pub fn from_code(code: i32) -> Self {
        match code {
            CODE_OK => PopupResult::Ok,
            CODE_CANCEL => PopupResult::Cancel,
            other => PopupResult::Other(other),
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            PopupResult::Ok => CODE_OK,
            PopupResult::Cancel => CODE_CANCEL,
            PopupResult::Other(code) => *code,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PopupResult::Ok => "ok",
            PopupResult::Cancel => "cancel",
            PopupResult::Other(_) => "other",
        }
    }
}

/// A host capability that shows a modal dialog and blocks until dismissed.
pub trait DialogService {
    /// Show the dialog and return the host's raw result code.
    fn show(&self, message: &str, title: &str, layout: ButtonLayout) -> Result<i32>;
}

impl<D: DialogService + ?Sized> DialogService for &D {
    fn show(&self, message: &str, title: &str, layout: ButtonLayout) -> Result<i32> {
        (**self).show(message, title, layout)
    }
}

impl<D: DialogService + ?Sized> DialogService for Box<D> {
    fn show(&self, message: &str, title: &str, layout: ButtonLayout) -> Result<i32> {
        (**self).show(message, title, layout)
    }
}

pub fn show_popup<D: DialogService>(
    service: &D,
    message: &str,
    title: &str,
    has_cancel_button: bool,
) -> Result<PopupResult> {
    let layout = ButtonLayout::for_cancel(has_cancel_button);
    let code = service.show(message, title, layout)?;
    Ok(PopupResult::from_code(code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use std::cell::RefCell;

    /// Records what it was asked to show and presses a scripted button.
    struct ScriptedDialog {
        press: Option<i32>,
        seen: RefCell<Vec<(String, String, ButtonLayout)>>,
    }

    impl ScriptedDialog {
        fn pressing(code: i32) -> Self {
            Self {
                press: Some(code),
                seen: RefCell::new(Vec::new()),
            }
        }

        fn unavailable() -> Self {
            Self {
                press: None,
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl DialogService for ScriptedDialog {
        fn show(&self, message: &str, title: &str, layout: ButtonLayout) -> Result<i32> {
            self.seen
                .borrow_mut()
                .push((message.to_string(), title.to_string(), layout));
            match self.press {
                Some(CODE_CANCEL) if !layout.has_cancel() => {
                    panic!("cancel pressed on a dialog without a cancel button")
                }
                Some(code) => Ok(code),
                None => Err(Error::capability_unavailable("native dialog service", vec![])),
            }
        }
    }

    #[test]
    fn single_button_dialog_yields_ok() {
        let dialog = ScriptedDialog::pressing(CODE_OK);

        let result = show_popup(&dialog, "Saved", "Info", false).unwrap();

        assert_eq!(result, PopupResult::Ok);
        assert_eq!(
            dialog.seen.borrow()[0],
            ("Saved".to_string(), "Info".to_string(), ButtonLayout::Ok)
        );
    }

    #[test]
    fn cancel_layout_maps_both_buttons() {
        let ok = ScriptedDialog::pressing(CODE_OK);
        assert_eq!(show_popup(&ok, "Go?", "Deploy", true).unwrap(), PopupResult::Ok);
        assert_eq!(ok.seen.borrow()[0].2, ButtonLayout::OkCancel);

        let cancel = ScriptedDialog::pressing(CODE_CANCEL);
        assert_eq!(
            show_popup(&cancel, "Go?", "Deploy", true).unwrap(),
            PopupResult::Cancel
        );
    }

    #[test]
    fn unknown_codes_pass_through() {
        let dialog = ScriptedDialog::pressing(7);
        let result = show_popup(&dialog, "m", "t", true).unwrap();
        assert_eq!(result, PopupResult::Other(7));
        assert_eq!(result.code(), 7);
        assert_eq!(result.as_str(), "other");
    }

    #[test]
    fn missing_capability_is_an_error_not_cancel() {
        let dialog = ScriptedDialog::unavailable();
        let err = show_popup(&dialog, "m", "t", true).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::CapabilityUnavailable);
    }

    #[test]
    fn codes_round_trip_for_named_results() {
        assert_eq!(PopupResult::from_code(1).code(), 1);
        assert_eq!(PopupResult::from_code(2).code(), 2);
        assert_eq!(PopupResult::from_code(0), PopupResult::Other(0));
    }

    #[test]
    fn boxed_services_dispatch() {
        let dialog: Box<dyn DialogService> = Box::new(ScriptedDialog::pressing(CODE_OK));
        assert_eq!(show_popup(&dialog, "m", "t", false).unwrap(), PopupResult::Ok);
    }
}
