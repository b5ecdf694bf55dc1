//! crates/logging/src/source.rs
//! Named emitters and the categories used to tint their context tag.

use std::fmt;

/// Kind of component emitting a message. Selects the color of the
/// `[name] ` context tag.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
#[repr(u8)]
pub enum Category {
    /// Not classified.
    #[default]
    Na,
    /// Input source.
    Input,
    /// Output destination.
    Output,
    /// Container writer.
    Muxer,
    /// Container reader.
    Demuxer,
    /// Encoder.
    Encoder,
    /// Decoder.
    Decoder,
    /// Processing filter.
    Filter,
    /// Bitstream filter.
    BitstreamFilter,
    /// Image scaler.
    Swscaler,
    /// Audio resampler.
    Swresampler,
    /// Video output device.
    DeviceVideoOutput,
    /// Video input device.
    DeviceVideoInput,
    /// Audio output device.
    DeviceAudioOutput,
    /// Audio input device.
    DeviceAudioInput,
    /// Generic output device.
    DeviceOutput,
    /// Generic input device.
    DeviceInput,
}

impl Category {
    /// Number of categories.
    pub const COUNT: usize = 17;

    /// Every category in table order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Na,
        Self::Input,
        Self::Output,
        Self::Muxer,
        Self::Demuxer,
        Self::Encoder,
        Self::Decoder,
        Self::Filter,
        Self::BitstreamFilter,
        Self::Swscaler,
        Self::Swresampler,
        Self::DeviceVideoOutput,
        Self::DeviceVideoInput,
        Self::DeviceAudioOutput,
        Self::DeviceAudioInput,
        Self::DeviceOutput,
        Self::DeviceInput,
    ];

    /// Position of the category in the color tables.
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short lowercase name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Na => "na",
            Self::Input => "input",
            Self::Output => "output",
            Self::Muxer => "muxer",
            Self::Demuxer => "demuxer",
            Self::Encoder => "encoder",
            Self::Decoder => "decoder",
            Self::Filter => "filter",
            Self::BitstreamFilter => "bitstream-filter",
            Self::Swscaler => "swscaler",
            Self::Swresampler => "swresampler",
            Self::DeviceVideoOutput => "device-video-output",
            Self::DeviceVideoInput => "device-video-input",
            Self::DeviceAudioOutput => "device-audio-output",
            Self::DeviceAudioInput => "device-audio-input",
            Self::DeviceOutput => "device-output",
            Self::DeviceInput => "device-input",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Context attached to a log call: the emitter's name and category.
///
/// ```
/// use logging::{Category, Source};
///
/// let source = Source::new("demux").with_category(Category::Demuxer);
/// assert_eq!(source.name(), "demux");
/// assert_eq!(source.category(), Category::Demuxer);
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub struct Source<'a> {
    name: &'a str,
    category: Category,
}

impl<'a> Source<'a> {
    /// Creates an unclassified source.
    #[must_use]
    pub const fn new(name: &'a str) -> Self {
        Self {
            name,
            category: Category::Na,
        }
    }

    /// Sets the category.
    #[must_use]
    pub const fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Emitter name printed in the context tag.
    #[must_use]
    pub const fn name(&self) -> &'a str {
        self.name
    }

    /// Emitter category.
    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }
}
