// SPDX-License-Identifier: GPL-3.0-or-later

//!
//! *Part of the wider calendar-picker project*
//!
//! This crate contains the calendar-picker procedural macros
//!

extern crate proc_macro;

use proc_macro::TokenStream;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::{LitInt, Token, parse_macro_input};

/// Generate the type with compile time bounds checking
fn generate_const_checked_integer_macro(
    input: TokenStream,
    type_name: &str,
    min: i64,
    max: i64,
) -> TokenStream {
    let lit = parse_macro_input!(input as LitInt);

    let value = match lit.base10_parse::<i64>() {
        Ok(v) => v,
        Err(_) => {
            return syn::Error::new_spanned(lit, "Expected a valid i64 integer literal")
                .to_compile_error()
                .into();
        }
    };

    if value < min || value > max {
        return syn::Error::new_spanned(
            lit,
            format!("{type_name} must be between {min} and {max}"),
        )
        .to_compile_error()
        .into();
    }

    let ident = syn::Ident::new(type_name, proc_macro2::Span::call_site());
    quote! {
        #ident::try_from(#value).unwrap()
    }
    .into()
}

/// Create a `DayOfMonth`, using `day_of_month!(x)`, with compile time checking
/// of the value.
#[proc_macro]
pub fn day_of_month(input: TokenStream) -> TokenStream {
    generate_const_checked_integer_macro(input, "DayOfMonth", 1, 31)
}

/// Create a `DayOfWeek` (grid column), using `day_of_week!(x)`, with compile
/// time checking of the value.
#[proc_macro]
pub fn day_of_week(input: TokenStream) -> TokenStream {
    generate_const_checked_integer_macro(input, "DayOfWeek", 0, 6)
}

/// `year, month, day` as written in `calendar_date!(2024, 3, 10)`
struct YearMonthDay {
    year: LitInt,
    month: LitInt,
    day: LitInt,
}

impl Parse for YearMonthDay {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let year = input.parse()?;
        input.parse::<Token![,]>()?;
        let month = input.parse()?;
        input.parse::<Token![,]>()?;
        let day = input.parse()?;
        Ok(YearMonthDay { year, month, day })
    }
}

fn is_leap_year(year: i64) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

fn days_in_month(year: i64, month: i64) -> i64 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Create a `CalendarDate`, using `calendar_date!(year, month, day)`, with
/// compile time checking that the day exists (months are 1 based).
#[proc_macro]
pub fn calendar_date(input: TokenStream) -> TokenStream {
    let YearMonthDay { year, month, day } = parse_macro_input!(input as YearMonthDay);

    let parsed = (
        year.base10_parse::<i64>(),
        month.base10_parse::<i64>(),
        day.base10_parse::<i64>(),
    );
    let (y, m, d) = match parsed {
        (Ok(y), Ok(m), Ok(d)) => (y, m, d),
        _ => {
            return syn::Error::new_spanned(year, "Expected valid integer literals")
                .to_compile_error()
                .into();
        }
    };

    if !(1..=12).contains(&m) {
        return syn::Error::new_spanned(month, "Month must be between 1 and 12")
            .to_compile_error()
            .into();
    }

    let max_day = days_in_month(y, m);
    if d < 1 || d > max_day {
        return syn::Error::new_spanned(
            day,
            format!("Day must be between 1 and {max_day} for {y}-{m:02}"),
        )
        .to_compile_error()
        .into();
    }

    quote! {
        CalendarDate::from_ymd(#y, #m, #d).unwrap()
    }
    .into()
}
