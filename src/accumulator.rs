//! Per-dimension accumulation of completion events

use crate::event::{Event, Resource};
use crate::stats::DimensionStats;

/// Grouping key extracted from a completion's resource descriptor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Address,
    Provider,
    ResourceType,
}

impl Dimension {
    /// Report order
    pub const ALL: [Dimension; 3] = [
        Dimension::Address,
        Dimension::Provider,
        Dimension::ResourceType,
    ];

    /// Key for this dimension
    pub fn key<'a>(&self, resource: &'a Resource) -> &'a str {
        match self {
            Dimension::Address => &resource.address,
            Dimension::Provider => &resource.implied_provider,
            Dimension::ResourceType => &resource.resource_type,
        }
    }

    /// Heading used in the text report
    pub fn label(&self) -> &'static str {
        match self {
            Dimension::Address => "address",
            Dimension::Provider => "provider (avg)",
            Dimension::ResourceType => "resource (avg)",
        }
    }

    /// Identifier used in machine-readable output
    pub fn name(&self) -> &'static str {
        match self {
            Dimension::Address => "address",
            Dimension::Provider => "provider",
            Dimension::ResourceType => "resource_type",
        }
    }
}

/// Record counts seen during accumulation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCounts {
    /// Every record handed to the accumulator
    pub seen: u64,
    /// Completion records folded into the mappings
    pub completions: u64,
    /// Records with any other tag
    pub ignored: u64,
}

/// Owns the three dimension mappings for a single run
#[derive(Debug, Default)]
pub struct Accumulator {
    by_address: DimensionStats,
    by_provider: DimensionStats,
    by_resource_type: DimensionStats,
    counts: EventCounts,
}

impl Accumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one event into every dimension. Non-completion events change
    /// nothing except the ignored counter.
    pub fn accumulate(&mut self, event: &Event) {
        self.counts.seen += 1;

        let hook = match event {
            Event::ApplyComplete(hook) => hook,
            Event::Other { .. } => {
                self.counts.ignored += 1;
                return;
            }
        };

        self.counts.completions += 1;
        for dimension in Dimension::ALL {
            let key = dimension.key(&hook.resource);
            self.dimension_mut(dimension)
                .record(key, hook.elapsed_seconds);
        }
    }

    /// Mapping for one dimension
    pub fn dimension(&self, dimension: Dimension) -> &DimensionStats {
        match dimension {
            Dimension::Address => &self.by_address,
            Dimension::Provider => &self.by_provider,
            Dimension::ResourceType => &self.by_resource_type,
        }
    }

    fn dimension_mut(&mut self, dimension: Dimension) -> &mut DimensionStats {
        match dimension {
            Dimension::Address => &mut self.by_address,
            Dimension::Provider => &mut self.by_provider,
            Dimension::ResourceType => &mut self.by_resource_type,
        }
    }

    pub fn counts(&self) -> EventCounts {
        self.counts
    }
}

impl<'a> Extend<&'a Event> for Accumulator {
    fn extend<I: IntoIterator<Item = &'a Event>>(&mut self, events: I) {
        for event in events {
            self.accumulate(event);
        }
    }
}

impl Extend<Event> for Accumulator {
    fn extend<I: IntoIterator<Item = Event>>(&mut self, events: I) {
        for event in events {
            self.accumulate(&event);
        }
    }
}
