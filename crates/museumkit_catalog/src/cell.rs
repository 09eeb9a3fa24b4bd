//! Cell micro-syntax classification: plain values, image cells and reel cells.

use regex::Regex;

use crate::conf::{
    C_CELL_PREFIX_REEL, C_CELL_TAG_IMAGE, C_PATTERN_FRAME_RANGE, CH_FRAME_PLACEHOLDER,
};
use crate::spec::{
    CellParseError, EnumCellKind, SiteBuildError, SpecImageRef, SpecPipelineOptions,
    SpecRotatingReel,
};

/// Classifies raw cell strings.
///
/// Built once per run from [`SpecPipelineOptions`]; classification is a pure
/// function of the cell value.
#[derive(Debug, Clone)]
pub struct CellValueParser {
    cell_delimiter: char,
    c_prefix_image: String,
    if_parse_reels: bool,
    re_frame_range: Regex,
}

impl CellValueParser {
    /// Build a parser for the given image delimiter and reel switch.
    pub fn new(cell_delimiter: char, if_parse_reels: bool) -> Result<Self, SiteBuildError> {
        Ok(Self {
            cell_delimiter,
            c_prefix_image: format!("{C_CELL_TAG_IMAGE}{cell_delimiter}"),
            if_parse_reels,
            re_frame_range: derive_frame_range_regex()?,
        })
    }

    /// Build a parser from pipeline options.
    pub fn from_options(options: &SpecPipelineOptions) -> Result<Self, SiteBuildError> {
        Self::new(options.cell_delimiter, options.if_parse_reels)
    }

    /// Whether `value` is an image cell.
    pub fn is_image(&self, value: &str) -> bool {
        value.starts_with(&self.c_prefix_image)
    }

    /// Whether `value` is a reel cell (always `false` when reels are disabled).
    pub fn is_reel(&self, value: &str) -> bool {
        self.if_parse_reels && value.starts_with(C_CELL_PREFIX_REEL)
    }

    /// Classify one cell value.
    pub fn parse(&self, value: &str) -> Result<EnumCellKind, CellParseError> {
        if self.is_image(value) {
            return self.parse_image(value).map(EnumCellKind::Image);
        }
        if let Some(c_frame_spec) = self.strip_reel_prefix(value) {
            return match self.derive_rotating_reel(c_frame_spec) {
                Ok(reel) => Ok(EnumCellKind::Reel(reel)),
                Err(_) => Err(CellParseError::MissingFrameRange {
                    value: value.to_string(),
                }),
            };
        }
        Ok(EnumCellKind::Plain(value.to_string()))
    }

    /// Split `pic<SEP><alt><SEP><url>` into its picture reference.
    ///
    /// At most three parts are split off, so the url keeps any further
    /// delimiter characters.
    pub fn parse_image(&self, value: &str) -> Result<SpecImageRef, CellParseError> {
        let l_parts: Vec<&str> = value.splitn(3, self.cell_delimiter).collect();
        let [_, c_alt, c_url] = l_parts.as_slice() else {
            return Err(CellParseError::MalformedImage {
                value: value.to_string(),
                n_parts: l_parts.len(),
            });
        };

        Ok(SpecImageRef {
            alt_text: (*c_alt).to_string(),
            url: (*c_url).to_string(),
        })
    }

    /// Derive first frame and frame pattern from a frame spec such as
    /// `img0001..0042.jpg`.
    ///
    /// The leftmost `<start>..<end>` run is used; later runs stay untouched.
    pub fn derive_rotating_reel(
        &self,
        frame_spec: &str,
    ) -> Result<SpecRotatingReel, CellParseError> {
        let Some(caps) = self.re_frame_range.captures(frame_spec) else {
            return Err(CellParseError::MissingFrameRange {
                value: frame_spec.to_string(),
            });
        };
        let (Some(m_range), Some(m_start)) = (caps.get(0), caps.name("start")) else {
            return Err(CellParseError::MissingFrameRange {
                value: frame_spec.to_string(),
            });
        };

        let c_head = &frame_spec[..m_range.start()];
        let c_tail = &frame_spec[m_range.end()..];
        let c_start = m_start.as_str();
        let c_placeholder: String =
            std::iter::repeat_n(CH_FRAME_PLACEHOLDER, c_start.len()).collect();

        Ok(SpecRotatingReel {
            first_frame: format!("{c_head}{c_start}{c_tail}"),
            frame_pattern: format!("{c_head}{c_placeholder}{c_tail}|{}", m_range.as_str()),
        })
    }

    fn strip_reel_prefix<'a>(&self, value: &'a str) -> Option<&'a str> {
        if !self.is_reel(value) {
            return None;
        }
        value.strip_prefix(C_CELL_PREFIX_REEL)
    }
}

fn derive_frame_range_regex() -> Result<Regex, SiteBuildError> {
    Regex::new(C_PATTERN_FRAME_RANGE).map_err(|e| {
        SiteBuildError::InvalidPattern(format!("Invalid frame range pattern: {e}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser() -> CellValueParser {
        CellValueParser::new('!', true).expect("parser")
    }

    #[test]
    fn frame_range_pattern_compiles() {
        let re = derive_frame_range_regex().expect("pattern");
        assert!(re.is_match("a01..09.jpg"));
        assert!(!re.is_match("a01.09.jpg"));
    }

    #[test]
    fn reel_derives_first_frame_and_pattern() {
        let reel = parser()
            .derive_rotating_reel("lens0001..0010.jpg")
            .expect("valid reel");
        assert_eq!(reel.first_frame, "lens0001.jpg");
        assert_eq!(reel.frame_pattern, "lens####.jpg|0001..0010");
    }

    #[test]
    fn reel_placeholder_width_follows_start_digits() {
        let reel = parser()
            .derive_rotating_reel("photos/cam/1..120.png")
            .expect("valid reel");
        assert_eq!(reel.first_frame, "photos/cam/1.png");
        assert_eq!(reel.frame_pattern, "photos/cam/#.png|1..120");

        let reel = parser()
            .derive_rotating_reel("shot_00010..00099.webp")
            .expect("valid reel");
        assert_eq!(reel.first_frame, "shot_00010.webp");
        assert_eq!(reel.frame_pattern, "shot_#####.webp|00010..00099");
    }

    #[test]
    fn reel_ignores_parent_dir_dots_and_uses_leftmost_range() {
        let reel = parser()
            .derive_rotating_reel("../reel/a01..09b02..05.jpg")
            .expect("valid reel");
        assert_eq!(reel.first_frame, "../reel/a01b02..05.jpg");
        assert_eq!(reel.frame_pattern, "../reel/a##b02..05.jpg|01..09");
    }

    #[test]
    fn reel_without_range_is_an_error() {
        let err = parser()
            .parse("rotate!lens.jpg")
            .expect_err("missing range must fail");
        assert_eq!(
            err,
            CellParseError::MissingFrameRange {
                value: "rotate!lens.jpg".to_string()
            }
        );
    }

    #[test]
    fn reel_cell_is_classified_as_reel() {
        let kind = parser().parse("rotate!lens0001..0010.jpg").expect("reel");
        assert_eq!(
            kind,
            EnumCellKind::Reel(SpecRotatingReel {
                first_frame: "lens0001.jpg".to_string(),
                frame_pattern: "lens####.jpg|0001..0010".to_string(),
            })
        );
    }

    #[test]
    fn reel_cell_is_plain_when_reels_disabled() {
        let parser = CellValueParser::new('!', false).expect("parser");
        assert!(!parser.is_reel("rotate!lens0001..0010.jpg"));
        assert_eq!(
            parser.parse("rotate!lens0001..0010.jpg"),
            Ok(EnumCellKind::Plain("rotate!lens0001..0010.jpg".to_string()))
        );
    }

    #[test]
    fn image_cell_splits_alt_and_url() {
        let kind = parser().parse("pic!Front view!images/front.png").expect("image");
        assert_eq!(
            kind,
            EnumCellKind::Image(SpecImageRef {
                alt_text: "Front view".to_string(),
                url: "images/front.png".to_string(),
            })
        );
    }

    #[test]
    fn image_cell_with_pipe_delimiter() {
        let parser = CellValueParser::new('|', true).expect("parser");
        assert!(parser.is_image("pic|Side|img/side.jpg"));
        assert!(!parser.is_image("pic!Side!img/side.jpg"));
        assert_eq!(
            parser.parse_image("pic|Side|img/side.jpg"),
            Ok(SpecImageRef {
                alt_text: "Side".to_string(),
                url: "img/side.jpg".to_string(),
            })
        );
    }

    #[test]
    fn image_url_keeps_extra_delimiters() {
        let image = parser()
            .parse_image("pic!Alt!https://example.org/a!b.png")
            .expect("image");
        assert_eq!(image.url, "https://example.org/a!b.png");
    }

    #[test]
    fn image_cell_with_too_few_parts_is_an_error() {
        assert_eq!(
            parser().parse("pic!only alt"),
            Err(CellParseError::MalformedImage {
                value: "pic!only alt".to_string(),
                n_parts: 2,
            })
        );
    }

    #[test]
    fn plain_values_pass_through_unchanged() {
        for c_value in ["", "Tessar 2.8/50", "picture frame", "pic", "rotate", "  spaced  "] {
            assert_eq!(
                parser().parse(c_value),
                Ok(EnumCellKind::Plain(c_value.to_string()))
            );
        }
    }
}
