//! Color expression evaluator
//!
//! Evaluates hex colors and (nested) color functions:
//!
//! ```text
//! #rgb  #rgba  #rrggbb  #rrggbbaa
//! rgb(r,g,b)  rgba(r,g,b,a)  rgba(color,alpha)
//! hsl(h,s,l)  hsla(h,s,l,a)
//! lighten|darken|saturate|desaturate|fadein|fadeout(color,amount[,options])
//! fade(color,amount[,options])  spin(color,angle[,options])
//! changeHue|changeSaturation|changeLightness|changeAlpha(color,value[,options])
//! mix(color1,color2[,weight][,options])  tint|shade(color[,weight][,options])
//! contrast(color,dark,light[,threshold])  over(foreground,background)
//! if(condition,trueColor,falseColor)  lazy(uiKey)  systemColor(name[,default])
//! ```
//!
//! Every argument is passed through the [`Resolver`] before it is evaluated,
//! so arguments may be `$key` references or `@variables`.

use std::slice;

use flatlaf_core::color_functions::{self, ColorFunction, DerivedColor, HslComponent};
use flatlaf_core::{Color, Hsl};
use tracing::warn;

use crate::error::{Result, StyleError};
use crate::loader::{parse_condition, parse_integer, parse_integer_in_range, parse_percentage};
use crate::parser::{parse_function_call, FunctionCall};
use crate::resolver::{Resolver, PROPERTY_PREFIX};
use crate::value::StyleValue;

/// Nesting limit for color functions
const MAX_DEPTH: usize = 100;

/// Default threshold of `contrast()` in percent
const CONTRAST_THRESHOLD: i32 = 43;

const FUNCTION_NAMES: &[&str] = &[
    "if",
    "lazy",
    "systemColor",
    "rgb",
    "rgba",
    "hsl",
    "hsla",
    "lighten",
    "darken",
    "saturate",
    "desaturate",
    "fadein",
    "fadeout",
    "fade",
    "spin",
    "changeHue",
    "changeSaturation",
    "changeLightness",
    "changeAlpha",
    "mix",
    "tint",
    "shade",
    "contrast",
    "over",
];

/// Evaluate a hex color or color function.
///
/// `Ok(None)` is a legitimate `null` result, e.g. `systemColor(name)`
/// without default on a platform that does not provide the color.
pub fn parse_color_or_function(value: &str, resolver: &dyn Resolver) -> Result<Option<Color>> {
    Ok(Evaluator::new(resolver)
        .eval(value, 0)?
        .and_then(|color| color.as_color()))
}

/// Like [`parse_color_or_function`], but keeps derived colors and maps
/// `null` to [`StyleValue::Null`]
pub(crate) fn parse_color_value(value: &str, resolver: &dyn Resolver) -> Result<StyleValue> {
    Ok(Evaluator::new(resolver)
        .eval(value, 0)?
        .unwrap_or(StyleValue::Null))
}

/// Whether `value` starts like a call of a known color function
pub(crate) fn is_function_call(value: &str) -> bool {
    FUNCTION_NAMES.iter().any(|name| {
        value
            .strip_prefix(name)
            .is_some_and(|rest| rest.trim_start().starts_with('('))
    })
}

/// Parse `#RGB`, `#RGBA`, `#RRGGBB` or `#RRGGBBAA`
pub fn parse_color(value: &str) -> Result<Color> {
    parse_color_rgba(value).map(Color::from_argb)
}

/// Parse a hex color into `0xAARRGGBB`; short forms double each nibble
pub fn parse_color_rgba(value: &str) -> Result<u32> {
    let invalid = || StyleError::invalid(format!("invalid color '{}'", value));

    let len = value.len();
    if !matches!(len, 4 | 5 | 7 | 9) || !value.starts_with('#') {
        return Err(invalid());
    }

    let mut n: u32 = 0;
    for ch in value[1..].chars() {
        let digit = ch.to_digit(16).ok_or_else(invalid)?;
        n = (n << 4) | digit;
    }

    if len <= 5 {
        let n1 = n & 0xf000;
        let n2 = n & 0xf00;
        let n3 = n & 0xf0;
        let n4 = n & 0xf;
        n = (n1 << 16) | (n1 << 12) | (n2 << 12) | (n2 << 8) | (n3 << 8) | (n3 << 4) | (n4 << 4) | n4;
    }

    Ok(if len == 4 || len == 7 {
        0xff00_0000 | n
    } else {
        // move alpha from lowest to highest byte
        ((n >> 8) & 0x00ff_ffff) | ((n & 0xff) << 24)
    })
}

/// Options of the form `relative autoInverse derived lazy`
#[derive(Clone, Copy, Debug, Default)]
struct Options {
    relative: bool,
    auto_inverse: bool,
    derived: bool,
    lazy: bool,
}

impl Options {
    fn parse(options: Option<&String>) -> Self {
        let Some(options) = options else {
            return Self::default();
        };

        let derived = options.contains("derived");
        Self {
            relative: options.contains("relative"),
            // derived colors invert automatically unless told otherwise
            auto_inverse: options.contains("autoInverse")
                || (derived && !options.contains("noAutoInverse")),
            derived,
            lazy: options.contains("lazy"),
        }
    }
}

/// Parameters of one function call
struct Args<'p> {
    value: &'p str,
    params: &'p [String],
}

impl<'p> Args<'p> {
    fn get(&self, index: usize) -> Result<&'p str> {
        self.params
            .get(index)
            .map(String::as_str)
            .ok_or_else(|| self.missing())
    }

    fn opt(&self, index: usize) -> Option<&'p String> {
        self.params.get(index)
    }

    fn len(&self) -> usize {
        self.params.len()
    }

    fn missing(&self) -> StyleError {
        StyleError::MissingParameters(self.value.to_string())
    }
}

struct Evaluator<'r> {
    resolver: &'r dyn Resolver,
}

impl<'r> Evaluator<'r> {
    fn new(resolver: &'r dyn Resolver) -> Self {
        Self { resolver }
    }

    fn eval(&self, value: &str, depth: usize) -> Result<Option<StyleValue>> {
        if let Some(call) = parse_function_call(value)? {
            return self.eval_function(value, &call, depth);
        }

        if value.ends_with(')') {
            return Err(if value.contains('(') {
                StyleError::UnknownFunction(value.to_string())
            } else {
                StyleError::invalid(format!("missing opening parenthesis in function '{}'", value))
            });
        }

        parse_color(value).map(|color| Some(StyleValue::Color(color)))
    }

    /// Resolve an argument and evaluate it one level deeper
    fn eval_arg(&self, arg: &str, depth: usize) -> Result<Option<StyleValue>> {
        self.eval(&self.resolver.resolve(arg)?, depth + 1)
    }

    fn color_arg(&self, arg: &str, depth: usize) -> Result<Option<Color>> {
        Ok(self.eval_arg(arg, depth)?.and_then(|color| color.as_color()))
    }

    fn eval_function(
        &self,
        value: &str,
        call: &FunctionCall<'_>,
        depth: usize,
    ) -> Result<Option<StyleValue>> {
        let args = Args {
            value,
            params: &call.params,
        };
        if args.len() == 0 {
            return Err(args.missing());
        }
        if depth > MAX_DEPTH {
            return Err(StyleError::EndlessRecursion(format!(
                "color function '{}'",
                value
            )));
        }

        use HslComponent::*;
        match call.name {
            "if" => {
                if args.len() != 3 {
                    return Err(args.missing());
                }
                let condition = parse_condition(args.get(0)?, self.resolver);
                self.eval_arg(args.get(if condition { 1 } else { 2 })?, depth)
            }
            "lazy" => {
                if args.len() != 1 {
                    return Err(args.missing());
                }
                self.eval_arg(&format!("{}{}", PROPERTY_PREFIX, args.get(0)?), depth)
            }
            "systemColor" => self.system_color(&args, depth),
            "rgb" => self.rgb_or_rgba(false, &args, depth),
            "rgba" => self.rgb_or_rgba(true, &args, depth),
            "hsl" => self.hsl_or_hsla(false, &args),
            "hsla" => self.hsl_or_hsla(true, &args),
            "lighten" => self.increase_decrease(Lightness, true, &args, depth),
            "darken" => self.increase_decrease(Lightness, false, &args, depth),
            "saturate" => self.increase_decrease(Saturation, true, &args, depth),
            "desaturate" => self.increase_decrease(Saturation, false, &args, depth),
            "fadein" => self.increase_decrease(Alpha, true, &args, depth),
            "fadeout" => self.increase_decrease(Alpha, false, &args, depth),
            "fade" => {
                let amount = parse_percentage(args.get(1)?)?;
                let function = ColorFunction::Fade { amount: amount as f32 };
                self.with_function(args.get(0)?, function, Options::parse(args.opt(2)), depth)
            }
            "spin" => {
                let angle = parse_integer(args.get(1)?)?;
                let function =
                    ColorFunction::increase_decrease(Hue, true, angle as f32, false, false);
                self.with_function(args.get(0)?, function, Options::parse(args.opt(2)), depth)
            }
            "changeHue" => self.change(Hue, &args, depth),
            "changeSaturation" => self.change(Saturation, &args, depth),
            "changeLightness" => self.change(Lightness, &args, depth),
            "changeAlpha" => self.change(Alpha, &args, depth),
            "mix" => self.mix(None, &args, depth),
            "tint" => self.mix(Some("#fff"), &args, depth),
            "shade" => self.mix(Some("#000"), &args, depth),
            "contrast" => self.contrast(&args, depth),
            "over" => self.over(&args, depth),
            _ => Err(StyleError::UnknownFunction(value.to_string())),
        }
    }

    fn system_color(&self, args: &Args<'_>, depth: usize) -> Result<Option<StyleValue>> {
        if let Some(color) = self.resolver.system_color(args.get(0)?) {
            return Ok(Some(StyleValue::Color(color)));
        }

        match args.opt(1).map(String::as_str) {
            None | Some("") | Some("null") => Ok(None),
            Some(default) => self.eval_arg(default, depth),
        }
    }

    fn rgb_or_rgba(&self, has_alpha: bool, args: &Args<'_>, depth: usize) -> Result<Option<StyleValue>> {
        // rgba(color,alpha) adds alpha to any color
        if has_alpha && args.len() == 2 {
            let alpha = parse_integer_in_range(args.get(1)?, 0, 255, true)?;
            let Some(color) = self.color_arg(args.get(0)?, depth)? else {
                return Ok(None);
            };
            return Ok(Some(StyleValue::Color(color.with_alpha(alpha as u8))));
        }

        let channel = |index: usize| -> Result<u8> {
            parse_integer_in_range(args.get(index)?, 0, 255, true).map(|v| v as u8)
        };
        let red = channel(0)?;
        let green = channel(1)?;
        let blue = channel(2)?;
        let alpha = if has_alpha { channel(3)? } else { 255 };

        Ok(Some(StyleValue::Color(Color::new(red, green, blue, alpha))))
    }

    fn hsl_or_hsla(&self, has_alpha: bool, args: &Args<'_>) -> Result<Option<StyleValue>> {
        let hue = parse_integer_in_range(args.get(0)?, 0, 360, false)?;
        let saturation = parse_percentage(args.get(1)?)?;
        let lightness = parse_percentage(args.get(2)?)?;
        let alpha = if has_alpha { parse_percentage(args.get(3)?)? } else { 100 };

        let hsl = Hsl::new(hue as f32, saturation as f32, lightness as f32);
        Ok(Some(StyleValue::Color(hsl.to_rgb(alpha as f32 / 100.0))))
    }

    fn increase_decrease(
        &self,
        component: HslComponent,
        increase: bool,
        args: &Args<'_>,
        depth: usize,
    ) -> Result<Option<StyleValue>> {
        let amount = parse_percentage(args.get(1)?)?;
        let options = Options::parse(args.opt(2));
        let function = ColorFunction::increase_decrease(
            component,
            increase,
            amount as f32,
            options.relative,
            options.auto_inverse,
        );
        self.with_function(args.get(0)?, function, options, depth)
    }

    fn change(&self, component: HslComponent, args: &Args<'_>, depth: usize) -> Result<Option<StyleValue>> {
        let value = if component == HslComponent::Hue {
            parse_integer(args.get(1)?)?
        } else {
            parse_percentage(args.get(1)?)?
        };
        let function = ColorFunction::Change {
            component,
            value: value as f32,
        };
        self.with_function(args.get(0)?, function, Options::parse(args.opt(2)), depth)
    }

    /// `mix(color1,color2[,weight][,options])`; tint and shade fix `color1`
    fn mix(&self, fixed_color1: Option<&str>, args: &Args<'_>, depth: usize) -> Result<Option<StyleValue>> {
        let mut i = 0;
        let color1_str = match fixed_color1 {
            Some(color1) => color1,
            None => {
                i += 1;
                args.get(0)?
            }
        };
        let color2_str = args.get(i)?;
        i += 1;

        // weight is optional, options may follow directly
        let mut weight = 50;
        if let Some(weight_str) = args.opt(i) {
            if weight_str.starts_with(|c: char| c.is_ascii_digit()) {
                weight = parse_percentage(weight_str)?;
                i += 1;
            }
        }
        let options = Options::parse(args.opt(i));

        let Some(color1) = self.color_arg(color1_str, depth)? else {
            return Ok(None);
        };

        let function = ColorFunction::Mix2 {
            color1,
            weight: weight as f32,
        };
        self.with_function(color2_str, function, options, depth)
    }

    fn contrast(&self, args: &Args<'_>, depth: usize) -> Result<Option<StyleValue>> {
        let color_str = args.get(0)?;
        let dark_str = args.get(1)?;
        let light_str = args.get(2)?;
        let threshold = match args.opt(3) {
            Some(threshold) => parse_percentage(threshold)?,
            None => CONTRAST_THRESHOLD,
        };

        let Some(color) = self.color_arg(color_str, depth)? else {
            return Ok(None);
        };

        let chosen = if color_functions::luma(color) * 100.0 < threshold as f32 {
            light_str
        } else {
            dark_str
        };
        self.eval_arg(chosen, depth)
    }

    fn over(&self, args: &Args<'_>, depth: usize) -> Result<Option<StyleValue>> {
        let background_str = args.get(1)?;

        let Some(foreground) = self.eval_arg(args.get(0)?, depth)? else {
            return Ok(None);
        };
        let Some(fg) = foreground.as_color() else {
            return Ok(None);
        };
        if fg.is_opaque() {
            return Ok(Some(foreground));
        }

        let opaque = fg.opaque();
        let Some(background) = self.color_arg(background_str, depth)? else {
            return Ok(Some(StyleValue::Color(opaque)));
        };

        let weight = fg.a as f32 / 255.0;
        let mixed = color_functions::mix(opaque, background, weight);
        Ok(Some(StyleValue::Color(mixed)))
    }

    /// Evaluate the base color and apply `function` to it
    fn with_function(
        &self,
        color_str: &str,
        function: ColorFunction,
        options: Options,
        depth: usize,
    ) -> Result<Option<StyleValue>> {
        if options.lazy {
            return self.lazy_function(color_str, function, depth);
        }

        let resolved = self.resolver.resolve(color_str)?;
        let Some(base) = self.eval(&resolved, depth + 1)? else {
            return Ok(None);
        };
        let Some(base_color) = base.as_color() else {
            return Ok(None);
        };

        let color = color_functions::apply_functions(base_color, slice::from_ref(&function));
        if !options.derived {
            return Ok(Some(StyleValue::Color(color)));
        }

        // join function chains only if the base function is written inline
        let functions = match base {
            StyleValue::DerivedColor(derived) if resolved == color_str => {
                let mut functions = derived.functions;
                functions.push(function);
                functions
            }
            _ => [function].into_iter().collect(),
        };
        Ok(Some(StyleValue::DerivedColor(DerivedColor { color, functions })))
    }

    /// `lazy` option: the base is a UI key, looked up now
    fn lazy_function(
        &self,
        ui_key: &str,
        function: ColorFunction,
        depth: usize,
    ) -> Result<Option<StyleValue>> {
        let reference = format!("{}{}", PROPERTY_PREFIX, ui_key);
        let resolved = match self.resolver.resolve(&reference) {
            Ok(resolved) => resolved,
            Err(err) if err.is_not_found() => {
                warn!(key = %ui_key, "lazy color base not found in UI defaults");
                return Ok(None);
            }
            Err(err) => return Err(err),
        };
        if resolved == "null" {
            return Ok(None);
        }

        let Some(base) = self.eval(&resolved, depth + 1)?.and_then(|v| v.as_color()) else {
            return Ok(None);
        };
        let color = color_functions::apply_functions(base, slice::from_ref(&function));
        Ok(Some(StyleValue::Color(color)))
    }
}
