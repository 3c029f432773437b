use super::access::GuardRequirements;

/// Dashboard pages known to the access guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Page {
    Dashboard,
    MakanBergizi,
    SekolahRakyat,
    Koperasi,
    Digitalisasi,
    KartuSejahtera,
    Umkm,
    PengelolaanSampah,
    Sppg,
    Settings,
}

impl Page {
    pub const ALL: [Page; 10] = [
        Page::Dashboard,
        Page::MakanBergizi,
        Page::SekolahRakyat,
        Page::Koperasi,
        Page::Digitalisasi,
        Page::KartuSejahtera,
        Page::Umkm,
        Page::PengelolaanSampah,
        Page::Sppg,
        Page::Settings,
    ];

    /// Route segment used by the front-end
    pub fn slug(&self) -> &'static str {
        match self {
            Page::Dashboard => "dashboard",
            Page::MakanBergizi => "mbg",
            Page::SekolahRakyat => "sekolah",
            Page::Koperasi => "koperasi",
            Page::Digitalisasi => "digitalisasi",
            Page::KartuSejahtera => "kartu-sejahtera",
            Page::Umkm => "umkm",
            Page::PengelolaanSampah => "sampah",
            Page::Sppg => "sppg",
            Page::Settings => "settings",
        }
    }

    pub fn from_slug(slug: &str) -> Option<Page> {
        Self::ALL.into_iter().find(|page| page.slug() == slug)
    }

    /// System setting that can switch the page off for every role
    pub fn setting_key(&self) -> Option<&'static str> {
        match self {
            Page::Dashboard | Page::Settings => None,
            Page::MakanBergizi => Some("mbg_page_enabled"),
            Page::SekolahRakyat => Some("sekolah_page_enabled"),
            Page::Koperasi => Some("koperasi_page_enabled"),
            Page::Digitalisasi => Some("digitalisasi_page_enabled"),
            Page::KartuSejahtera => Some("kartu_sejahtera_page_enabled"),
            Page::Umkm => Some("umkm_page_enabled"),
            Page::PengelolaanSampah => Some("sampah_page_enabled"),
            Page::Sppg => Some("sppg_page_enabled"),
        }
    }

    pub fn requirements(&self) -> GuardRequirements {
        let requirements = match self.setting_key() {
            Some(key) => GuardRequirements::setting(key),
            None => GuardRequirements::authenticated(),
        };

        match self {
            Page::Settings => requirements.requiring_super_user(),
            _ => requirements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugs_round_trip() {
        for page in Page::ALL {
            assert_eq!(Page::from_slug(page.slug()), Some(page));
        }
        assert_eq!(Page::from_slug("unknown"), None);
    }

    #[test]
    fn test_sppg_page_depends_on_its_flag_only() {
        let requirements = Page::Sppg.requirements();
        assert_eq!(requirements.setting_key.as_deref(), Some("sppg_page_enabled"));
        assert!(!requirements.require_super_user);
    }

    #[test]
    fn test_settings_page_requires_super_user() {
        let requirements = Page::Settings.requirements();
        assert!(requirements.require_super_user);
        assert_eq!(requirements.setting_key, None);
    }
}
