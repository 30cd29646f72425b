use blockhaven_site::PriceFormatter;
use blockhaven_site::money::{group_digits, join_price};
#[cfg(target_arch = "wasm32")]
use blockhaven_site::numbers::to_js_number;
#[cfg(target_arch = "wasm32")]
use js_sys::{Function, Intl, Object};
#[cfg(target_arch = "wasm32")]
use wasm_bindgen::JsValue;

/// Format an integer with the locale's digits and grouping via Intl.
///
/// Amounts a JS number cannot hold exactly, and host builds, use plain comma
/// grouping.
#[must_use]
pub fn fmt_number(amount: i64, locale: &str) -> String {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(exact) = to_js_number(amount) {
            let locales = js_sys::Array::new();
            locales.push(&JsValue::from_str(locale));
            let nf = Intl::NumberFormat::new(&locales, &Object::new());
            let format_fn: Function = nf.format();
            if let Some(text) = format_fn
                .call1(&nf, &JsValue::from_f64(exact))
                .ok()
                .and_then(|v| v.as_string())
            {
                return text;
            }
        }
        group_digits(amount, ",")
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = locale;
        group_digits(amount, ",")
    }
}

/// Localized numeral followed by the currency suffix.
#[must_use]
pub fn fmt_price(amount: i64, locale: &str, suffix: &str) -> String {
    join_price(&fmt_number(amount, locale), suffix)
}

/// Price formatter handed to the controller.
#[must_use]
pub fn price_formatter(locale: String, suffix: String) -> PriceFormatter {
    Box::new(move |amount| fmt_price(amount, &locale, &suffix))
}

#[cfg(all(test, not(target_arch = "wasm32")))]
mod tests {
    use super::*;

    #[test]
    fn host_fallback_groups_with_commas() {
        assert_eq!(fmt_number(1_234_567, "fa-IR"), "1,234,567");
        assert_eq!(fmt_price(50_000, "fa-IR", "تومان"), "50,000 تومان");
    }

    #[test]
    fn boxed_formatter_matches_direct_call() {
        let format = price_formatter("fa-IR".into(), "Toman".into());
        assert_eq!(format(999), fmt_price(999, "fa-IR", "Toman"));
    }
}
