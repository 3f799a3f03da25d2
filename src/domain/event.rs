//! Event records as consumed by the stores.
//!
//! Events are owned by the catalogue collaborator. The stores treat them as
//! immutable value objects: a bookmark or a purchased ticket captures a full
//! snapshot that does not follow later edits to the live event.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether attending requires a ticket purchase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    /// Tickets are sold at [`Event::ticket_price`].
    Paid,
    /// Free entry.
    Free,
}

/// Lifecycle status of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventStatus {
    /// Awaiting confirmation by the organizer.
    Pending,
    /// Confirmed and on sale.
    Confirmed,
    /// Cancelled.
    Cancelled,
    /// Already took place.
    Completed,
}

/// Ticket price in a given currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TicketPrice {
    /// ISO currency code (e.g. `"USD"`).
    pub currency: String,
    /// Price per ticket.
    pub amount: f64,
}

/// Geographic coordinates in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// A single event as listed in the catalogue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    /// Catalogue identifier, the key of the bookmark mapping.
    pub id: String,
    /// Title shown in lists and on the map.
    pub title: String,
    /// Calendar date of the event.
    pub date: DateTime<Utc>,
    /// Human-readable start time (e.g. `"19:30"`).
    pub time: String,
    /// Cover image URL.
    #[serde(default)]
    pub cover_image: String,
    /// Gallery image URLs.
    #[serde(default)]
    pub images: Vec<String>,
    /// Venue name.
    pub venue: String,
    /// Paid or free entry.
    pub event_type: EventType,
    /// Free-text location (city, address).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Coordinates used to place the event on the map.
    #[serde(
        rename = "locationCordinates",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub coordinates: Option<GeoPoint>,
    /// Promotional video URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub video: Option<String>,
    /// Capacity: total number of tickets.
    pub number_of_tickets: u32,
    /// Price per ticket; absent for free events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ticket_price: Option<TicketPrice>,
    /// Category tag.
    pub category: EventCategory,
    /// Free-text description.
    #[serde(default)]
    pub description: String,
    /// Lifecycle status.
    pub status: EventStatus,
    /// Number of tickets sold so far.
    #[serde(default)]
    pub ticket_sold: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Event {
    /// Fraction of capacity already sold, in `0.0..=1.0` for sane data.
    ///
    /// Returns `0.0` for events without capacity.
    #[must_use]
    pub fn sell_through(&self) -> f64 {
        if self.number_of_tickets == 0 {
            return 0.0;
        }
        f64::from(self.ticket_sold) / f64::from(self.number_of_tickets)
    }

    /// Returns `true` when no tickets are left.
    #[must_use]
    pub fn is_sold_out(&self) -> bool {
        self.ticket_sold >= self.number_of_tickets
    }
}

/// Category tag of an event.
///
/// Serialized as the human-readable display string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventCategory {
    // Business & Professional
    /// Conferences
    #[serde(rename = "Conferences")]
    Conferences,
    /// Networking Events
    #[serde(rename = "Networking Events")]
    NetworkingEvents,
    /// Trade Shows & Expos
    #[serde(rename = "Trade Shows & Expos")]
    TradeShows,
    /// Seminars & Workshops
    #[serde(rename = "Seminars & Workshops")]
    Seminars,
    /// Product Launches
    #[serde(rename = "Product Launches")]
    ProductLaunches,

    // Technology & Innovation
    /// Tech Conferences
    #[serde(rename = "Tech Conferences")]
    TechConferences,
    /// Hackathons
    #[serde(rename = "Hackathons")]
    Hackathons,
    /// Webinars
    #[serde(rename = "Webinars")]
    Webinars,
    /// Startups & Pitch Events
    #[serde(rename = "Startups & Pitch Events")]
    StartupEvents,
    /// AI & Blockchain Events
    #[serde(rename = "AI & Blockchain Events")]
    AIandBlockchain,

    // Entertainment & Lifestyle
    /// Concerts & Music Festivals
    #[serde(rename = "Concerts & Music Festivals")]
    Concerts,
    /// Movie Premieres
    #[serde(rename = "Movie Premieres")]
    MoviePremieres,
    /// Fashion Shows
    #[serde(rename = "Fashion Shows")]
    FashionShows,
    /// Comedy Shows
    #[serde(rename = "Comedy Shows")]
    ComedyShows,
    /// Award Ceremonies
    #[serde(rename = "Award Ceremonies")]
    AwardCeremonies,

    // Sports & Fitness
    /// Marathons & Races
    #[serde(rename = "Marathons & Races")]
    Marathons,
    /// Yoga & Wellness Retreats
    #[serde(rename = "Yoga & Wellness Retreats")]
    YogaRetreats,
    /// Esports & Gaming Tournaments
    #[serde(rename = "Esports & Gaming Tournaments")]
    EsportsTournaments,
    /// Extreme Sports Events
    #[serde(rename = "Extreme Sports Events")]
    ExtremeSports,
    /// Bodybuilding & Fitness Expos
    #[serde(rename = "Bodybuilding & Fitness Expos")]
    BodybuildingExpos,

    // Education & Training
    /// Workshops & Bootcamps
    #[serde(rename = "Workshops & Bootcamps")]
    Workshops,
    /// University Open Days
    #[serde(rename = "University Open Days")]
    UniversityOpenDays,
    /// Career Fairs
    #[serde(rename = "Career Fairs")]
    CareerFairs,
    /// Online Courses & Webinars
    #[serde(rename = "Online Courses & Webinars")]
    OnlineCourses,
    /// Student Competitions
    #[serde(rename = "Student Competitions")]
    StudentCompetitions,

    // Cultural & Community
    /// Festivals & Parades
    #[serde(rename = "Festivals & Parades")]
    Festivals,
    /// Religious Gatherings
    #[serde(rename = "Religious Gatherings")]
    ReligiousGatherings,
    /// Charity & Fundraising Events
    #[serde(rename = "Charity & Fundraising Events")]
    CharityEvents,
    /// Heritage & Cultural Celebrations
    #[serde(rename = "Heritage & Cultural Celebrations")]
    HeritageCelebrations,
    /// Local Community Meetups
    #[serde(rename = "Local Community Meetups")]
    CommunityMeetups,

    // Food & Drinks
    /// Food Festivals
    #[serde(rename = "Food Festivals")]
    FoodFestivals,
    /// Wine Tasting & Brewery Tours
    #[serde(rename = "Wine Tasting & Brewery Tours")]
    WineTasting,
    /// Cooking Classes
    #[serde(rename = "Cooking Classes")]
    CookingClasses,
    /// Farmers’ Markets
    #[serde(rename = "Farmers’ Markets")]
    FarmersMarkets,
    /// Restaurant Openings
    #[serde(rename = "Restaurant Openings")]
    RestaurantOpenings,

    // Arts & Creativity
    /// Art Exhibitions & Galleries
    #[serde(rename = "Art Exhibitions & Galleries")]
    ArtExhibitions,
    /// Theater & Dance Performances
    #[serde(rename = "Theater & Dance Performances")]
    TheaterPerformances,
    /// Poetry & Spoken Word Events
    #[serde(rename = "Poetry & Spoken Word Events")]
    PoetryEvents,
    /// Photography & Film Festivals
    #[serde(rename = "Photography & Film Festivals")]
    FilmFestivals,
    /// Writing & Storytelling Workshops
    #[serde(rename = "Writing & Storytelling Workshops")]
    WritingWorkshops,

    // Science & Environment
    /// Environmental Summits
    #[serde(rename = "Environmental Summits")]
    EnvironmentalSummits,
    /// Space & Astronomy Events
    #[serde(rename = "Space & Astronomy Events")]
    SpaceEvents,
    /// Science Fairs & Exhibitions
    #[serde(rename = "Science Fairs & Exhibitions")]
    ScienceFairs,
    /// Wildlife Conservation Events
    #[serde(rename = "Wildlife Conservation Events")]
    WildlifeConservation,
    /// Sustainability & Green Energy Conferences
    #[serde(rename = "Sustainability & Green Energy Conferences")]
    GreenEnergyConferences,

    // Family & Kids
    /// Children's Workshops
    #[serde(rename = "Children's Workshops")]
    ChildrensWorkshops,
    /// Storytelling Sessions
    #[serde(rename = "Storytelling Sessions")]
    StorytellingSessions,
    /// Family Fun Days
    #[serde(rename = "Family Fun Days")]
    FamilyFunDays,
    /// Amusement Park Events
    #[serde(rename = "Amusement Park Events")]
    AmusementParkEvents,
    /// Toy & Games Conventions
    #[serde(rename = "Toy & Games Conventions")]
    ToyConventions,
    /// Funeral
    #[serde(rename = "Funeral")]
    Funeral,
}

impl EventCategory {
    /// Every category, in catalogue order.
    pub const ALL: [Self; 51] = [
        Self::Conferences,
        Self::NetworkingEvents,
        Self::TradeShows,
        Self::Seminars,
        Self::ProductLaunches,
        Self::TechConferences,
        Self::Hackathons,
        Self::Webinars,
        Self::StartupEvents,
        Self::AIandBlockchain,
        Self::Concerts,
        Self::MoviePremieres,
        Self::FashionShows,
        Self::ComedyShows,
        Self::AwardCeremonies,
        Self::Marathons,
        Self::YogaRetreats,
        Self::EsportsTournaments,
        Self::ExtremeSports,
        Self::BodybuildingExpos,
        Self::Workshops,
        Self::UniversityOpenDays,
        Self::CareerFairs,
        Self::OnlineCourses,
        Self::StudentCompetitions,
        Self::Festivals,
        Self::ReligiousGatherings,
        Self::CharityEvents,
        Self::HeritageCelebrations,
        Self::CommunityMeetups,
        Self::FoodFestivals,
        Self::WineTasting,
        Self::CookingClasses,
        Self::FarmersMarkets,
        Self::RestaurantOpenings,
        Self::ArtExhibitions,
        Self::TheaterPerformances,
        Self::PoetryEvents,
        Self::FilmFestivals,
        Self::WritingWorkshops,
        Self::EnvironmentalSummits,
        Self::SpaceEvents,
        Self::ScienceFairs,
        Self::WildlifeConservation,
        Self::GreenEnergyConferences,
        Self::ChildrensWorkshops,
        Self::StorytellingSessions,
        Self::FamilyFunDays,
        Self::AmusementParkEvents,
        Self::ToyConventions,
        Self::Funeral,
    ];

    /// Returns the display string, identical to the serialized form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Conferences => "Conferences",
            Self::NetworkingEvents => "Networking Events",
            Self::TradeShows => "Trade Shows & Expos",
            Self::Seminars => "Seminars & Workshops",
            Self::ProductLaunches => "Product Launches",
            Self::TechConferences => "Tech Conferences",
            Self::Hackathons => "Hackathons",
            Self::Webinars => "Webinars",
            Self::StartupEvents => "Startups & Pitch Events",
            Self::AIandBlockchain => "AI & Blockchain Events",
            Self::Concerts => "Concerts & Music Festivals",
            Self::MoviePremieres => "Movie Premieres",
            Self::FashionShows => "Fashion Shows",
            Self::ComedyShows => "Comedy Shows",
            Self::AwardCeremonies => "Award Ceremonies",
            Self::Marathons => "Marathons & Races",
            Self::YogaRetreats => "Yoga & Wellness Retreats",
            Self::EsportsTournaments => "Esports & Gaming Tournaments",
            Self::ExtremeSports => "Extreme Sports Events",
            Self::BodybuildingExpos => "Bodybuilding & Fitness Expos",
            Self::Workshops => "Workshops & Bootcamps",
            Self::UniversityOpenDays => "University Open Days",
            Self::CareerFairs => "Career Fairs",
            Self::OnlineCourses => "Online Courses & Webinars",
            Self::StudentCompetitions => "Student Competitions",
            Self::Festivals => "Festivals & Parades",
            Self::ReligiousGatherings => "Religious Gatherings",
            Self::CharityEvents => "Charity & Fundraising Events",
            Self::HeritageCelebrations => "Heritage & Cultural Celebrations",
            Self::CommunityMeetups => "Local Community Meetups",
            Self::FoodFestivals => "Food Festivals",
            Self::WineTasting => "Wine Tasting & Brewery Tours",
            Self::CookingClasses => "Cooking Classes",
            Self::FarmersMarkets => "Farmers’ Markets",
            Self::RestaurantOpenings => "Restaurant Openings",
            Self::ArtExhibitions => "Art Exhibitions & Galleries",
            Self::TheaterPerformances => "Theater & Dance Performances",
            Self::PoetryEvents => "Poetry & Spoken Word Events",
            Self::FilmFestivals => "Photography & Film Festivals",
            Self::WritingWorkshops => "Writing & Storytelling Workshops",
            Self::EnvironmentalSummits => "Environmental Summits",
            Self::SpaceEvents => "Space & Astronomy Events",
            Self::ScienceFairs => "Science Fairs & Exhibitions",
            Self::WildlifeConservation => "Wildlife Conservation Events",
            Self::GreenEnergyConferences => "Sustainability & Green Energy Conferences",
            Self::ChildrensWorkshops => "Children's Workshops",
            Self::StorytellingSessions => "Storytelling Sessions",
            Self::FamilyFunDays => "Family Fun Days",
            Self::AmusementParkEvents => "Amusement Park Events",
            Self::ToyConventions => "Toy & Games Conventions",
            Self::Funeral => "Funeral",
        }
    }
}

impl fmt::Display for EventCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use chrono::{TimeZone, Utc};

    use super::*;

    /// Builds a confirmed paid event with the given id and no coordinates.
    pub(crate) fn event(id: &str) -> Event {
        let created = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).single().unwrap_or_default();
        Event {
            id: id.to_string(),
            title: format!("Event {id}"),
            date: created,
            time: "19:30".to_string(),
            cover_image: String::new(),
            images: Vec::new(),
            venue: "Main Hall".to_string(),
            event_type: EventType::Paid,
            location: None,
            coordinates: None,
            video: None,
            number_of_tickets: 100,
            ticket_price: Some(TicketPrice {
                currency: "USD".to_string(),
                amount: 25.0,
            }),
            category: EventCategory::Concerts,
            description: String::new(),
            status: EventStatus::Confirmed,
            ticket_sold: 0,
            created_at: created,
            updated_at: created,
        }
    }
}
