//! Clinical form model.
//!
//! Numeric fields are free text; categorical fields are selectors cycling
//! through their closed set of codes, so an unmapped category cannot be
//! entered.

use zeroize::Zeroize;

use crate::domain::{
    parse_numeric, Category, ChestPainType, ClinicalInput, ExerciseAngina, RestingEcg, Sex,
    StSlope,
};

/// Identifies a form field independent of its position on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Age,
    Sex,
    ChestPain,
    RestingBp,
    Cholesterol,
    FastingBs,
    RestingEcg,
    MaxHr,
    Angina,
    Oldpeak,
    Slope,
    HeartDisease,
}

/// Editable value of a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Raw text; parsed at submission time
    Text(String),
    /// Index into the field's options
    Choice(usize),
}

/// Form field definition
#[derive(Debug, Clone)]
pub struct FormField {
    pub key: FieldKey,
    pub label: &'static str,
    pub hint: &'static str,
    pub value: FieldValue,
    /// `(code, label)` pairs for selectors, empty for text fields
    pub options: Vec<(&'static str, &'static str)>,
}

impl FormField {
    fn text(key: FieldKey, label: &'static str, hint: &'static str) -> Self {
        Self {
            key,
            label,
            hint,
            value: FieldValue::Text(String::new()),
            options: Vec::new(),
        }
    }

    fn choice<C: Category>(key: FieldKey, label: &'static str) -> Self {
        Self {
            key,
            label,
            hint: "\u{2190}/\u{2192} to change",
            value: FieldValue::Choice(0),
            options: C::ALL.iter().map(|c| (c.as_str(), c.label())).collect(),
        }
    }

    /// Text shown for the current value (empty for blank text fields).
    #[must_use]
    pub fn display(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Choice(i) => self
                .options
                .get(*i)
                .map(|(_, label)| (*label).to_string())
                .unwrap_or_default(),
        }
    }

    #[must_use]
    pub fn is_choice(&self) -> bool {
        matches!(self.value, FieldValue::Choice(_))
    }
}

/// Clinical form state
#[derive(Debug, Clone)]
pub struct ClinicalForm {
    pub fields: Vec<FormField>,
    pub selected_field: usize,
}

impl Default for ClinicalForm {
    fn default() -> Self {
        Self {
            fields: vec![
                FormField::text(FieldKey::Age, "Age", "years"),
                FormField::choice::<Sex>(FieldKey::Sex, "Sex"),
                FormField::choice::<ChestPainType>(FieldKey::ChestPain, "Chest Pain Type"),
                FormField::text(FieldKey::RestingBp, "Resting BP", "mm Hg"),
                FormField::text(FieldKey::Cholesterol, "Cholesterol", "mg/dl"),
                FormField::text(FieldKey::FastingBs, "Fasting Blood Sugar", "1 if > 120 mg/dl, else 0"),
                FormField::choice::<RestingEcg>(FieldKey::RestingEcg, "Resting ECG"),
                FormField::text(FieldKey::MaxHr, "Max Heart Rate", "bpm"),
                FormField::choice::<ExerciseAngina>(FieldKey::Angina, "Exercise Angina"),
                FormField::text(FieldKey::Oldpeak, "Oldpeak", "ST depression, mm"),
                FormField::choice::<StSlope>(FieldKey::Slope, "ST Slope"),
                FormField::text(FieldKey::HeartDisease, "Heart Disease", "prior diagnosis, 0 or 1"),
            ],
            selected_field: 0,
        }
    }
}

impl ClinicalForm {
    /// Move to the next field
    pub fn next_field(&mut self) {
        self.selected_field = (self.selected_field + 1) % self.fields.len();
    }

    /// Move to the previous field
    pub fn prev_field(&mut self) {
        if self.selected_field == 0 {
            self.selected_field = self.fields.len() - 1;
        } else {
            self.selected_field -= 1;
        }
    }

    /// Select a field by key.
    pub fn focus(&mut self, key: FieldKey) {
        if let Some(i) = self.fields.iter().position(|f| f.key == key) {
            self.selected_field = i;
        }
    }

    /// Add a character to the current text field
    pub fn input_char(&mut self, c: char) {
        if let FieldValue::Text(s) = &mut self.fields[self.selected_field].value {
            if c.is_ascii_digit() || c == '.' || c == '-' {
                s.push(c);
            }
        }
    }

    /// Delete the last character
    pub fn delete_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.fields[self.selected_field].value {
            s.pop();
        }
    }

    /// Clear the current text field
    pub fn clear_field(&mut self) {
        if let FieldValue::Text(s) = &mut self.fields[self.selected_field].value {
            s.clear();
        }
    }

    /// Step the current selector forward or backward, wrapping around.
    pub fn cycle_choice(&mut self, forward: bool) {
        let field = &mut self.fields[self.selected_field];
        let len = field.options.len();
        if let FieldValue::Choice(i) = &mut field.value {
            if len > 0 {
                *i = if forward { (*i + 1) % len } else { (*i + len - 1) % len };
            }
        }
    }

    /// Set a text field directly.
    pub fn set_text(&mut self, key: FieldKey, text: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            if let FieldValue::Text(s) = &mut field.value {
                s.clear();
                s.push_str(text);
            }
        }
    }

    /// Set a selector by its short code. Unknown codes leave it unchanged.
    pub fn set_choice(&mut self, key: FieldKey, code: &str) {
        if let Some(field) = self.fields.iter_mut().find(|f| f.key == key) {
            if let Some(idx) = field.options.iter().position(|(c, _)| *c == code) {
                field.value = FieldValue::Choice(idx);
            }
        }
    }

    fn field(&self, key: FieldKey) -> Option<&FormField> {
        self.fields.iter().find(|f| f.key == key)
    }

    fn number(&self, key: FieldKey) -> f64 {
        match self.field(key).map(|f| &f.value) {
            Some(FieldValue::Text(s)) => parse_numeric(s),
            _ => f64::NAN,
        }
    }

    fn category<C: Category>(&self, key: FieldKey) -> C {
        let idx = match self.field(key).map(|f| &f.value) {
            Some(FieldValue::Choice(i)) => *i,
            _ => 0,
        };
        C::ALL[idx % C::ALL.len()]
    }

    /// Take the submission-time snapshot of the form.
    ///
    /// Blank or malformed numbers become `NaN`; nothing is range checked.
    #[must_use]
    pub fn snapshot(&self) -> ClinicalInput {
        ClinicalInput {
            age: self.number(FieldKey::Age),
            sex: self.category(FieldKey::Sex),
            chest_pain_type: self.category(FieldKey::ChestPain),
            resting_bp: self.number(FieldKey::RestingBp),
            cholesterol: self.number(FieldKey::Cholesterol),
            fasting_blood_sugar: self.number(FieldKey::FastingBs),
            resting_ecg: self.category(FieldKey::RestingEcg),
            max_hr: self.number(FieldKey::MaxHr),
            exercise_angina: self.category(FieldKey::Angina),
            oldpeak: self.number(FieldKey::Oldpeak),
            st_slope: self.category(FieldKey::Slope),
            heart_disease_flag: self.number(FieldKey::HeartDisease),
        }
    }

    /// Wipe text buffers once the form is no longer shown.
    pub fn clear_sensitive(&mut self) {
        for field in self.fields.iter_mut() {
            match &mut field.value {
                FieldValue::Text(s) => s.zeroize(),
                FieldValue::Choice(i) => *i = 0,
            }
        }
        self.selected_field = 0;
    }

    /// Load sample data for testing (63yo male, atypical angina)
    pub fn load_sample_data(&mut self) {
        let text = [
            (FieldKey::Age, "63"),
            (FieldKey::RestingBp, "145"),
            (FieldKey::Cholesterol, "233"),
            (FieldKey::FastingBs, "1"),
            (FieldKey::MaxHr, "150"),
            (FieldKey::Oldpeak, "2.3"),
            (FieldKey::HeartDisease, "0"),
        ];
        for (key, value) in text {
            self.set_text(key, value);
        }

        let choices = [
            (FieldKey::Sex, "M"),
            (FieldKey::ChestPain, "ATA"),
            (FieldKey::RestingEcg, "Normal"),
            (FieldKey::Angina, "N"),
            (FieldKey::Slope, "Up"),
        ];
        for (key, code) in choices {
            self.set_choice(key, code);
        }
    }
}
