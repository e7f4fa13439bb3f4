use fontdb::{Database, Family, Query, Stretch, Style, Weight};

/// The font roles the diagrams draw with. Sizes are fixed per role and shared
/// by every diagram in the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontRole {
    Title,
    Header,
    Body,
    Small,
    Code,
}

impl FontRole {
    pub const ALL: [FontRole; 5] = [
        FontRole::Title,
        FontRole::Header,
        FontRole::Body,
        FontRole::Small,
        FontRole::Code,
    ];

    pub fn size(self) -> f32 {
        match self {
            FontRole::Title => 28.0,
            FontRole::Header => 18.0,
            FontRole::Body => 14.0,
            FontRole::Small => 12.0,
            FontRole::Code => 12.0,
        }
    }

    pub fn bold(self) -> bool {
        matches!(self, FontRole::Title | FontRole::Header)
    }

    pub fn monospace(self) -> bool {
        matches!(self, FontRole::Code)
    }

    fn slot(self) -> usize {
        match self {
            FontRole::Title => 0,
            FontRole::Header => 1,
            FontRole::Body => 2,
            FontRole::Small => 3,
            FontRole::Code => 4,
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadedFont {
    pub data: Vec<u8>,
    pub index: u32,
}

/// One resolved face per role. Discovery prefers DejaVu (the faces the
/// reference figures were drawn with), then any sans-serif/monospace face,
/// then any face at all. A role that resolves to nothing renders no glyphs
/// but never fails the run.
pub struct FontSet {
    faces: [Option<LoadedFont>; 5],
}

impl FontSet {
    pub fn load() -> FontSet {
        let mut db = Database::new();
        db.load_system_fonts();
        FontSet::from_database(&db)
    }

    pub fn from_database(db: &Database) -> FontSet {
        let mut faces: [Option<LoadedFont>; 5] = [None, None, None, None, None];
        for role in FontRole::ALL {
            faces[role.slot()] = pick_face(db, role);
        }
        if faces.iter().all(Option::is_none) {
            eprintln!("No usable fonts found; diagrams will render without text");
        }
        FontSet { faces }
    }

    /// A set with no faces at all. Geometry-only rendering, used by tests.
    pub fn empty() -> FontSet {
        FontSet {
            faces: [None, None, None, None, None],
        }
    }

    pub fn get(&self, role: FontRole) -> Option<&LoadedFont> {
        self.faces[role.slot()].as_ref()
    }
}

fn pick_face(db: &Database, role: FontRole) -> Option<LoadedFont> {
    let preferred: &[Family] = if role.monospace() {
        &[Family::Name("DejaVu Sans Mono"), Family::Monospace]
    } else {
        &[Family::Name("DejaVu Sans"), Family::SansSerif]
    };
    let weight = if role.bold() {
        Weight::BOLD
    } else {
        Weight::NORMAL
    };

    query_face(db, preferred, weight)
        .or_else(|| query_face(db, &[Family::SansSerif], Weight::NORMAL))
        .or_else(|| {
            // Last resort: any face in the database.
            let id = db.faces().next().map(|face| face.id)?;
            load_face(db, id)
        })
}

fn query_face(db: &Database, families: &[Family], weight: Weight) -> Option<LoadedFont> {
    let id = db.query(&Query {
        families,
        weight,
        stretch: Stretch::Normal,
        style: Style::Normal,
    })?;
    load_face(db, id)
}

fn load_face(db: &Database, id: fontdb::ID) -> Option<LoadedFont> {
    db.with_face_data(id, |data, index| LoadedFont {
        data: data.to_vec(),
        index,
    })
}
