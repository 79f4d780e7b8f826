use crate::SampleProvider;
use common::{AppError, SampleImage};

/// Radio values of the three sample slots, in page order
pub const SLOT_NAMES: [&str; 3] = ["one", "two", "three"];

#[derive(Debug, Clone, PartialEq)]
pub struct SampleSlot {
    pub name: &'static str,
    pub checked: bool,
    pub image: SampleImage,
}

impl SampleSlot {
    /// Radio button followed by the sample markup. The selected sample is
    /// read back later as the element right after the checked radio.
    pub fn to_html(&self) -> String {
        format!(
            r#"<input type="radio" id="{name}" name="image" value="{name}"{checked}/>{image}"#,
            name = self.name,
            checked = if self.checked { " checked" } else { "" },
            image = self.image.as_str(),
        )
    }
}

/// One full generation of samples; slot `one` is always checked
#[derive(Debug, Clone, PartialEq)]
pub struct SampleSlots([SampleSlot; 3]);

impl SampleSlots {
    pub fn slots(&self) -> &[SampleSlot; 3] {
        &self.0
    }

    pub fn checked(&self) -> Option<&SampleSlot> {
        self.0.iter().find(|slot| slot.checked)
    }
}

pub struct SampleSelector<P> {
    provider: P,
}

impl<P: SampleProvider> SampleSelector<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Fetch three fresh samples. Nothing from a previous call is reused.
    pub fn generate(&self) -> Result<SampleSlots, AppError> {
        let fetch = |index: usize| -> Result<SampleSlot, AppError> {
            let markup = self.provider.sample().map_err(AppError::Boundary)?;
            Ok(SampleSlot {
                name: SLOT_NAMES[index],
                checked: index == 0,
                image: SampleImage::new(markup),
            })
        };
        Ok(SampleSlots([fetch(0)?, fetch(1)?, fetch(2)?]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    struct Counter(Cell<u32>);

    impl SampleProvider for Counter {
        fn sample(&self) -> Result<String, String> {
            self.0.set(self.0.get() + 1);
            Ok(format!("<img src=\"data:image/png;base64,{}\">", self.0.get()))
        }
    }

    struct Broken;

    impl SampleProvider for Broken {
        fn sample(&self) -> Result<String, String> {
            Err("no samples bundled".to_string())
        }
    }

    #[test]
    fn test_generate_fills_three_slots_with_first_checked() {
        let slots = SampleSelector::new(Counter(Cell::new(0))).generate().unwrap();

        let names: Vec<&str> = slots.slots().iter().map(|s| s.name).collect();
        assert_eq!(names, SLOT_NAMES);
        assert_eq!(slots.checked().unwrap().name, "one");
        assert_eq!(slots.slots().iter().filter(|s| s.checked).count(), 1);
        assert_ne!(slots.slots()[0].image, slots.slots()[1].image);
    }

    #[test]
    fn test_slot_markup() {
        let slots = SampleSelector::new(Counter(Cell::new(0))).generate().unwrap();

        assert_eq!(
            slots.slots()[0].to_html(),
            r#"<input type="radio" id="one" name="image" value="one" checked/><img src="data:image/png;base64,1">"#
        );
        assert!(!slots.slots()[2].to_html().contains("checked"));
    }

    #[test]
    fn test_provider_failure_is_boundary_error() {
        let err = SampleSelector::new(Broken).generate().unwrap_err();
        assert_eq!(err, AppError::Boundary("no samples bundled".to_string()));
    }
}
