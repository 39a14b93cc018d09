use contracts::shared::validation::FieldErrors;
use leptos::prelude::*;

/// Reactive field errors of one form
#[derive(Clone, Copy)]
pub struct FormErrors(RwSignal<FieldErrors>);

impl FormErrors {
    pub fn new() -> Self {
        Self(RwSignal::new(FieldErrors::new()))
    }

    pub fn set(&self, errors: FieldErrors) {
        self.0.set(errors);
    }

    pub fn reset(&self) {
        self.0.set(FieldErrors::new());
    }

    pub fn has_errors(&self) -> bool {
        self.0.with(|e| !e.is_empty())
    }

    /// Error message of `field`, for an input's `error` prop
    pub fn field(&self, field: &'static str) -> Signal<Option<String>> {
        let errors = self.0;
        Signal::derive(move || errors.with(|e| e.get(field).map(str::to_string)))
    }

    /// Drop the error of `field` whenever `source` changes
    pub fn clear_on_edit<S>(&self, source: S, field: &'static str)
    where
        S: Track + 'static,
    {
        let errors = self.0;
        Effect::new(move |prev: Option<()>| {
            source.track();
            if prev.is_some() {
                errors.update(|e| e.clear(field));
            }
        });
    }
}

impl Default for FormErrors {
    fn default() -> Self {
        Self::new()
    }
}
