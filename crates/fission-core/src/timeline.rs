//! The hand-curated nuclear history dataset.
//!
//! Events are static data: built into the binary, never mutated, and always
//! loaded as a whole. The canonical order below is the order the dataset was
//! authored in; the navigator works on a year-sorted view of it.

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Discovery,
    Technology,
    Policy,
    Event,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Discovery => "discovery",
            Category::Technology => "technology",
            Category::Policy => "policy",
            Category::Event => "event",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Discovery => "Discovery",
            Category::Technology => "Technology",
            Category::Policy => "Policy",
            Category::Event => "Event",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotableFigure {
    pub name: &'static str,
    pub role: Option<&'static str>,
    pub description: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Source {
    pub title: &'static str,
    pub url: Option<&'static str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimelineEvent {
    pub id: &'static str,
    pub year: i32,
    pub title: &'static str,
    pub description: &'static str,
    pub category: Category,
    pub impact: Option<&'static str>,
    /// Long-form account, only surfaced at the expert level
    pub details: Option<&'static str>,
    pub notable_figures: &'static [NotableFigure],
    pub sources: &'static [Source],
}

pub fn timeline_events() -> &'static [TimelineEvent] {
    TIMELINE_EVENTS
}

pub fn find_event(id: &str) -> Option<&'static TimelineEvent> {
    TIMELINE_EVENTS.iter().find(|e| e.id == id)
}

pub static TIMELINE_EVENTS: &[TimelineEvent] = &[
    TimelineEvent {
        id: "discovery-of-fission",
        year: 1938,
        title: "Discovery of Nuclear Fission",
        description: "Otto Hahn and Fritz Strassmann discover nuclear fission in Germany, with theoretical explanation from Lise Meitner and Otto Frisch.",
        category: Category::Discovery,
        impact: Some("The discovery showed that splitting a heavy nucleus releases enormous energy. Within a few years it led to both nuclear reactors and nuclear weapons."),
        details: Some("In December 1938, German chemists Otto Hahn and Fritz Strassmann conducted experiments bombarding uranium with neutrons. They discovered that the uranium nucleus split into lighter elements when struck by neutrons, releasing massive amounts of energy. Lise Meitner and her nephew Otto Frisch provided the theoretical interpretation of this phenomenon, coining the term \"nuclear fission.\" This discovery would fundamentally change physics and world history."),
        notable_figures: &[
            NotableFigure {
                name: "Otto Hahn",
                role: Some("Chemist"),
                description: Some("German chemist who discovered nuclear fission, later awarded the Nobel Prize in Chemistry (1944)."),
            },
            NotableFigure {
                name: "Lise Meitner",
                role: Some("Physicist"),
                description: Some("Austrian-Swedish physicist who provided the theoretical explanation for nuclear fission, but was controversially excluded from the Nobel Prize."),
            },
        ],
        sources: &[Source {
            title: "American Institute of Physics",
            url: Some("https://www.aip.org/history-programs/physics-history/nuclear-fission-discovered"),
        }],
    },
    TimelineEvent {
        id: "einstein-letter",
        year: 1939,
        title: "Einstein-Szilárd Letter",
        description: "Albert Einstein and Leo Szilárd warn President Roosevelt about the potential for Nazi Germany to develop nuclear weapons.",
        category: Category::Policy,
        impact: Some("The letter moved nuclear research onto the President's desk. It set in motion the government programs that became the Manhattan Project."),
        details: Some("In August 1939, concerned about Nazi Germany's potential to develop nuclear weapons, physicists Leo Szilárd and Eugene Wigner drafted a letter to President Franklin D. Roosevelt. Albert Einstein signed the letter, lending his prestige to the warning. The letter alerted Roosevelt to the possibility of creating \"extremely powerful bombs of a new type\" and urged U.S. action. This letter would ultimately lead to the establishment of the Manhattan Project."),
        notable_figures: &[
            NotableFigure {
                name: "Albert Einstein",
                role: Some("Physicist"),
                description: Some("Though he did not work directly on the Manhattan Project, his letter to Roosevelt was instrumental in starting U.S. atomic research."),
            },
            NotableFigure {
                name: "Leo Szilárd",
                role: Some("Physicist"),
                description: Some("Hungarian-American physicist who conceived the nuclear chain reaction and drafted the Einstein-Szilárd letter."),
            },
        ],
        sources: &[],
    },
    TimelineEvent {
        id: "manhattan-project",
        year: 1942,
        title: "Manhattan Project Begins",
        description: "The U.S. officially launches the Manhattan Project to develop the first nuclear weapons.",
        category: Category::Technology,
        impact: Some("The project built an entire nuclear industry in three years. Its laboratories at Los Alamos, Oak Ridge and Hanford shaped nuclear science for decades."),
        details: Some("In September 1942, the U.S. Army established the Manhattan Engineering District under the command of General Leslie Groves, with scientific leadership from J. Robert Oppenheimer. This secret program, which would come to be known as the Manhattan Project, employed over 130,000 people and cost nearly $2 billion (equivalent to about $23 billion today). Research and production facilities were built across the United States, with major sites at Oak Ridge, Tennessee; Hanford, Washington; and Los Alamos, New Mexico."),
        notable_figures: &[
            NotableFigure {
                name: "J. Robert Oppenheimer",
                role: Some("Scientific Director"),
                description: Some("American physicist who served as scientific director of the Manhattan Project at Los Alamos Laboratory."),
            },
            NotableFigure {
                name: "General Leslie Groves",
                role: Some("Military Leader"),
                description: Some("U.S. Army Corps of Engineers officer who directed the Manhattan Project."),
            },
        ],
        sources: &[Source {
            title: "U.S. Department of Energy, The Manhattan Project: An Interactive History",
            url: None,
        }],
    },
    TimelineEvent {
        id: "first-nuclear-reactor",
        year: 1942,
        title: "First Nuclear Reactor",
        description: "Enrico Fermi and his team achieve the first controlled nuclear chain reaction at Chicago Pile-1.",
        category: Category::Technology,
        impact: Some("Chicago Pile-1 proved a chain reaction could be started and stopped on purpose. Every nuclear reactor since descends from that experiment."),
        details: Some("On December 2, 1942, a team led by Enrico Fermi achieved the first controlled, self-sustaining nuclear chain reaction at the University of Chicago. The experiment took place in a squash court beneath the university's football stadium, using a pile of graphite blocks and uranium arranged in a precise lattice. This success demonstrated that controlled nuclear energy was possible and paved the way for both nuclear weapons and peaceful nuclear energy applications."),
        notable_figures: &[NotableFigure {
            name: "Enrico Fermi",
            role: Some("Physicist"),
            description: Some("Italian-American physicist who created the world's first nuclear reactor, Chicago Pile-1."),
        }],
        sources: &[],
    },
    TimelineEvent {
        id: "trinity-test",
        year: 1945,
        title: "Trinity Test",
        description: "First detonation of a nuclear weapon in New Mexico.",
        category: Category::Event,
        impact: Some("Trinity confirmed the plutonium implosion design. It opened the nuclear age and the arms race that followed."),
        details: Some("On July 16, 1945, the United States conducted the world's first nuclear weapon test, codenamed \"Trinity,\" in the Jornada del Muerto desert in New Mexico. The plutonium implosion device, nicknamed \"The Gadget,\" produced an explosion equivalent to approximately 21 kilotons of TNT. The successful test confirmed the viability of the implosion-design plutonium weapon, which would later be used in the \"Fat Man\" bomb dropped on Nagasaki."),
        notable_figures: &[NotableFigure {
            name: "J. Robert Oppenheimer",
            role: Some("Scientific Director"),
            description: Some("Upon witnessing the explosion, famously recalled the Bhagavad Gita verse: \"Now I am become Death, the destroyer of worlds.\""),
        }],
        sources: &[],
    },
    TimelineEvent {
        id: "hiroshima-nagasaki",
        year: 1945,
        title: "Hiroshima and Nagasaki",
        description: "Atomic bombs dropped on Hiroshima and Nagasaki, Japan, ending World War II.",
        category: Category::Event,
        impact: Some("These remain the only uses of nuclear weapons in war. The loss of life shaped every later debate about nuclear arms."),
        details: Some("On August 6 and 9, 1945, the United States dropped atomic bombs on the Japanese cities of Hiroshima and Nagasaki, respectively. The Hiroshima bomb, \"Little Boy,\" used uranium-235 and had a yield of about 15 kilotons. The Nagasaki bomb, \"Fat Man,\" used plutonium-239 and had a yield of about 21 kilotons. These remain the only use of nuclear weapons in armed conflict. The bombings killed between 129,000 and 226,000 people, mostly civilians, and led to Japan's surrender on August 15, ending World War II."),
        notable_figures: &[],
        sources: &[],
    },
    TimelineEvent {
        id: "atomic-energy-act",
        year: 1946,
        title: "Atomic Energy Act",
        description: "U.S. establishes civilian control over nuclear energy through the Atomic Energy Commission.",
        category: Category::Policy,
        impact: Some("Civilians, not the military, took charge of atomic energy. The Atomic Energy Commission became the framework for peaceful nuclear development."),
        details: Some("The Atomic Energy Act of 1946 transferred control of atomic energy from military to civilian hands, specifically the newly created Atomic Energy Commission (AEC). The Act established a government monopoly on nuclear materials and technology in the United States and prohibited the sharing of nuclear information with other countries. It represented the first attempt to establish both governmental control and a framework for the peaceful development of nuclear energy."),
        notable_figures: &[],
        sources: &[Source {
            title: "Atomic Energy Act of 1946, Public Law 79-585",
            url: None,
        }],
    },
    TimelineEvent {
        id: "first-nuclear-power",
        year: 1951,
        title: "First Nuclear Power Generation",
        description: "Experimental Breeder Reactor I in Idaho becomes the first nuclear reactor to generate electricity.",
        category: Category::Technology,
        impact: Some("EBR-I lit four light bulbs and then its own building. It showed that fission could make usable electricity."),
        details: Some("On December 20, 1951, at the National Reactor Testing Station (now Idaho National Laboratory), Experimental Breeder Reactor I (EBR-I) became the first nuclear reactor to generate usable amounts of electricity. The reactor initially produced about 100 kilowatts of electricity, enough to power its own building. This milestone demonstrated the feasibility of using nuclear energy for civilian electricity production."),
        notable_figures: &[],
        sources: &[],
    },
    TimelineEvent {
        id: "atoms-for-peace",
        year: 1953,
        title: "\"Atoms for Peace\" Speech",
        description: "President Eisenhower delivers his \"Atoms for Peace\" speech to the United Nations.",
        category: Category::Policy,
        impact: Some("The speech reframed nuclear technology as a tool for energy and medicine. It led to the founding of the International Atomic Energy Agency."),
        details: Some("On December 8, 1953, President Dwight D. Eisenhower delivered his \"Atoms for Peace\" speech to the United Nations General Assembly. In this landmark address, Eisenhower proposed international cooperation on peaceful applications of atomic energy. This initiative led to the establishment of the International Atomic Energy Agency (IAEA) and programs to provide nuclear technology and materials for peaceful purposes, marking a shift from purely military applications to civilian nuclear power."),
        notable_figures: &[NotableFigure {
            name: "Dwight D. Eisenhower",
            role: Some("President"),
            description: None,
        }],
        sources: &[],
    },
    TimelineEvent {
        id: "first-commercial-plant",
        year: 1957,
        title: "First Commercial Nuclear Power Plant",
        description: "Shippingport Atomic Power Station, the first large-scale nuclear power plant in the U.S., begins operation.",
        category: Category::Technology,
        impact: Some("Shippingport proved the pressurized water reactor on the grid. That design went on to dominate the U.S. commercial fleet."),
        details: Some("On December 2, 1957, the Shippingport Atomic Power Station in Pennsylvania, the first full-scale nuclear power plant devoted exclusively to civilian electricity production in the United States, reached criticality. The plant began commercial operation in 1958. Developed under President Eisenhower's \"Atoms for Peace\" program, Shippingport demonstrated the feasibility of commercial nuclear power and operated safely until its decommissioning in 1982."),
        notable_figures: &[NotableFigure {
            name: "Hyman Rickover",
            role: Some("Admiral"),
            description: Some("Led the naval reactors program whose pressurized water reactor technology was adapted for Shippingport."),
        }],
        sources: &[],
    },
    TimelineEvent {
        id: "three-mile-island",
        year: 1979,
        title: "Three Mile Island Accident",
        description: "Partial meltdown at Three Mile Island nuclear power plant in Pennsylvania.",
        category: Category::Event,
        impact: Some("The accident changed how Americans saw nuclear safety. Regulation tightened and new plant orders all but stopped for decades."),
        details: Some("On March 28, 1979, a cooling malfunction caused a partial meltdown at the Three Mile Island Nuclear Generating Station near Harrisburg, Pennsylvania. While there were no deaths or injuries, the accident released small amounts of radioactive gases and iodine into the environment. This event dramatically changed the perception of nuclear safety in the United States, leading to significantly increased regulatory oversight and effectively halting the expansion of nuclear power in the country for decades."),
        notable_figures: &[],
        sources: &[Source {
            title: "U.S. NRC Backgrounder on the Three Mile Island Accident",
            url: None,
        }],
    },
    TimelineEvent {
        id: "nuclear-waste-policy-act",
        year: 1982,
        title: "Nuclear Waste Policy Act",
        description: "Legislation establishes a national framework for the disposal of spent nuclear fuel and high-level radioactive waste.",
        category: Category::Policy,
        impact: Some("The Act made permanent waste disposal a federal responsibility. Utilities began paying into a fund for a future repository."),
        details: Some("The Nuclear Waste Policy Act of 1982 established a comprehensive national program for the safe, permanent disposal of highly radioactive wastes from nuclear power plants. The Act directed the Department of Energy to study potential sites for a geological repository, with the costs to be paid by nuclear utilities. This legislation attempted to address one of the most significant challenges of nuclear power: the long-term management of nuclear waste."),
        notable_figures: &[],
        sources: &[Source {
            title: "Nuclear Waste Policy Act of 1982, Public Law 97-425",
            url: None,
        }],
    },
    TimelineEvent {
        id: "yucca-mountain",
        year: 1987,
        title: "Yucca Mountain Repository",
        description: "Congress designates Yucca Mountain, Nevada as the sole site for a deep geological repository for nuclear waste.",
        category: Category::Policy,
        impact: Some("Focusing on a single site concentrated the political fight in Nevada. The repository has still not opened."),
        details: Some("The Nuclear Waste Policy Amendments Act of 1987 designated Yucca Mountain in Nevada as the sole site for further study as a permanent geological repository for nuclear waste. This controversial decision, sometimes called the \"Screw Nevada Bill,\" focused all repository efforts on one location. Despite decades of study and billions of dollars spent, political opposition and technical concerns have prevented the repository from being completed."),
        notable_figures: &[],
        sources: &[],
    },
    TimelineEvent {
        id: "nuclear-renaissance",
        year: 2005,
        title: "Nuclear Renaissance Begins",
        description: "Energy Policy Act of 2005 provides incentives for new nuclear power plants.",
        category: Category::Policy,
        impact: Some("Loan guarantees and tax credits revived interest in new reactors. Many proposals were later cancelled as natural gas got cheaper."),
        details: Some("The Energy Policy Act of 2005 included significant incentives for the nuclear industry, such as loan guarantees, tax credits, and insurance against regulatory delays. These provisions were intended to spark a \"nuclear renaissance\" after decades without new nuclear plant construction in the United States. The legislation led to a wave of new plant applications, though many were eventually canceled due to economic factors and competition from cheap natural gas."),
        notable_figures: &[],
        sources: &[Source {
            title: "Energy Policy Act of 2005, Public Law 109-58",
            url: None,
        }],
    },
    TimelineEvent {
        id: "vogtle-construction",
        year: 2013,
        title: "New Nuclear Construction",
        description: "Construction begins on new reactors at Plant Vogtle, the first new nuclear units in the U.S. in decades.",
        category: Category::Technology,
        impact: Some("Vogtle showed new reactors could still be finished in the U.S. Its delays and cost overruns also showed how hard that is."),
        details: Some("In 2013, construction began on two new AP1000 reactors at the Vogtle Electric Generating Plant in Georgia, representing the first new nuclear units built in the United States in over 30 years. The project has faced significant delays and cost overruns, highlighting the challenges of nuclear construction in the modern era. Despite these issues, Unit 3 entered commercial operation in July 2023, with Unit 4 following in early 2024."),
        notable_figures: &[],
        sources: &[],
    },
    TimelineEvent {
        id: "small-modular-reactors",
        year: 2020,
        title: "Small Modular Reactors",
        description: "NuScale Power receives first U.S. approval for a small modular reactor design.",
        category: Category::Technology,
        impact: Some("Factory-built reactors promise shorter construction and flexible sizing. They are the industry's bet on fixing nuclear economics."),
        details: Some("In August 2020, NuScale Power received the first U.S. Nuclear Regulatory Commission design approval for a small modular reactor (SMR). SMRs represent a new approach to nuclear power generation, featuring standardized, factory-built reactors that can be transported to sites for assembly. These smaller reactors promise enhanced safety features, reduced construction times, and the ability to scale power generation based on demand, potentially overcoming some of the economic challenges faced by traditional large nuclear plants."),
        notable_figures: &[],
        sources: &[],
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_ids_are_unique() {
        let mut seen = HashSet::new();
        for event in timeline_events() {
            assert!(seen.insert(event.id), "duplicate id {}", event.id);
        }
    }

    #[test]
    fn test_dataset_is_authored_in_year_order() {
        let years: Vec<i32> = timeline_events().iter().map(|e| e.year).collect();
        assert!(years.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(years.first(), Some(&1938));
        assert_eq!(years.last(), Some(&2020));
    }

    #[test]
    fn test_every_event_has_text() {
        for event in timeline_events() {
            assert!(!event.title.is_empty());
            assert!(event.description.ends_with('.'), "{} description", event.id);
            for figure in event.notable_figures {
                assert!(!figure.name.is_empty());
            }
            for source in event.sources {
                assert!(!source.title.is_empty());
            }
        }
    }

    #[test]
    fn test_find_event() {
        let event = find_event("trinity-test").unwrap();
        assert_eq!(event.year, 1945);
        assert_eq!(event.category, Category::Event);
        assert!(find_event("missing").is_none());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Technology).unwrap();
        assert_eq!(json, "\"technology\"");
    }
}
