use super::days::MAPS_SEARCH_URL;
use super::types::{ScheduleCollection, ScheduleEntry};

#[derive(Clone, Copy)]
struct Seed {
    id: &'static str,
    time: &'static str,
    title: &'static str,
    desc: &'static str,
    map_query: Option<&'static str>,
    highlight: bool,
}

const fn seed(id: &'static str, time: &'static str, title: &'static str, desc: &'static str) -> Seed {
    Seed {
        id,
        time,
        title,
        desc,
        map_query: None,
        highlight: false,
    }
}

impl Seed {
    const fn map(self, query: &'static str) -> Seed {
        Seed {
            map_query: Some(query),
            ..self
        }
    }

    const fn highlight(self) -> Seed {
        Seed {
            highlight: true,
            ..self
        }
    }

    fn to_entry(self) -> ScheduleEntry {
        ScheduleEntry {
            id: self.id.to_string(),
            time: self.time.to_string(),
            title: self.title.to_string(),
            description: self.desc.to_string(),
            link: self.map_query.map(|q| format!("{}{}", MAPS_SEARCH_URL, q)),
            highlight: self.highlight,
        }
    }
}

const DAY1: &[Seed] = &[
    seed("d1-1", "09:20", "🏠 HOME", "出發前往高鐵站"),
    seed("d1-2", "10:00", "🚅 台中高鐵站", "搭乘高鐵前往桃園"),
    seed("d1-3", "10:30", "🚄 桃園高鐵站", "轉機捷 (10:47 或 11:02 發車)"),
    seed("d1-4", "12:10", "🛫 桃園機場 T1", "虎航櫃檯報到 (7號櫃檯)\n先去晃晃再進候機室")
        .map("Taoyuan+Airport+Terminal+1"),
    seed("d1-5", "14:40", "✈️ 起飛 (IT212)", "台北 TPE → 大阪 KIX").highlight(),
    seed("d1-6", "17:55", "🛬 抵達關西機場", "準備 VJW 截圖、護照\n預留入境審查時間")
        .map("Kansai+International+Airport"),
    seed("d1-7", "19:30", "🚆 Haruka 特急", "前往京都車站\n⚠️ 用 Klook 憑證兌換實體票").highlight(),
    seed("d1-8", "21:00", "🚕 移動至飯店", "京都車站 → RESI STAY\n建議搭 Uber 或計程車")
        .map("RESI+STAY+Gojozaka"),
    seed("d1-9", "21:15", "🍜 晚餐 / 補給", "飯店附近覓食"),
    seed("d1-10", "23:00", "💤 休息睡覺", "⚠️ 明天要超級早起，請早睡！"),
];

const DAY2: &[Seed] = &[
    seed("d2-1", "05:30", "⏰ 起床梳洗", "痛苦一下，照片會很美！"),
    seed("d2-2", "06:00", "📸 二三年坂 & 清水寺", "抵達後右轉，享受寧靜")
        .highlight()
        .map("Kiyomizu-dera"),
    seed("d2-3", "07:50", "☕ 二年坂星巴克", "拍復古外觀，喝杯草莓限定星冰樂")
        .map("Starbucks+Coffee+Kyoto+Ninenzaka+Yasaka+Chaya"),
    seed("d2-4", "09:30", "🍡 清水坂", "商店陸續開門，邊走邊吃").map("Kiyomizu-zaka"),
    seed("d2-5", "10:30", "⛩️ 八坂神社 & 花見小路", "沿路下坡散步，輕鬆逛").map("Yasaka+Shrine"),
    seed("d2-6", "11:30", "🦆 祇園白川 & 鴨川", "京都最美的散步路徑").map("Gion+Shirakawa"),
    seed("d2-7", "12:30", "🍤 午餐時間", "⚠️ 週末熱門時段可能需排隊"),
    seed("d2-8", "13:30", "🛍️ 錦市場 & 新京極", "逛街、買伴手禮、吃小吃").map("Nishiki+Market"),
    seed("d2-9", "16:00", "🦊 伏見稻荷大社", "千本鳥居 (傍晚氣氛神秘)").map("Fushimi+Inari+Taisha"),
    seed("d2-10", "17:30", "🎁 京都車站", "伴手禮採購 / 站前地下街").map("Kyoto+Station"),
    seed("d2-11", "18:30", "🍁 夜楓", "清水寺 或 東寺 夜間拜觀").map("Kiyomizu-dera+Night+Viewing"),
    seed("d2-12", "20:00", "🥢 晚餐", "視參觀地點決定"),
];

const DAY3: &[Seed] = &[
    seed("d3-1", "06:30", "👋 退房出發", "搭計程車前往京都車站寄放行李").map("Kyoto+Station"),
    seed("d3-2", "08:00", "🎋 嵐山", "搭車去愛宕念佛寺 (避開人潮)").map("Otagi+Nenbutsu-ji"),
    seed("d3-3", "11:00", "🍱 嵐山午餐", "推薦喜重郎或亀山家").highlight(),
    seed("d3-4", "14:00", "🎨 teamLab Biovortex", "京都最新開幕！沈浸式藝術體驗 (需預約)")
        .map("teamLab+Biovortex+Kyoto"),
    seed("d3-5", "15:30", "🛍️ 京都車站", "JR前往難波 & 領行李 & 最後採購").map("Kyoto+Station"),
    seed("d3-6", "17:00", "🚆 前往難波", "入住 The OneFive Osaka Namba")
        .map("The+OneFive+Osaka+Namba"),
    seed("d3-7", "19:00", "🦀 道頓堀 & 心齋橋", "跑跑人看板合照、晚餐、逛藥妝").map("Dotonbori"),
];

const DAY4: &[Seed] = &[
    seed("d4-1", "06:30", "🚇 出發前往箕面萱野", "難波 → 梅田 → 箕面萱野 → 計程車")
        .map("Minoh-Kayano+Station"),
    seed("d4-2", "08:00", "👹 勝尾寺 (達摩寺)", "滿山滿谷的小達摩，必拍！")
        .highlight()
        .map("Katsuo-ji"),
    seed("d4-3", "10:30", "🚕 前往 箕面瀑布", "走路下山吸芬多精").map("Minoh+Waterfall"),
    seed("d4-4", "13:00", "🏙️ 返回梅田市區午餐", "Grand Front 或 LUCUA 百貨").map("Grand+Front+Osaka"),
    seed("d4-5", "15:00", "🛍️ 梅田商圈 / 天滿", "購物迷宮 (天滿有小吃)")
        .map("Umeda+Shopping+District"),
    seed("d4-6", "17:30", "🎄 梅田聖誕市集", "Grand Front、梅田藍天大廈").map("Umeda+Sky+Building"),
    seed("d4-7", "18:30", "🌃 WowUs (ワオアス)", "大阪地標絕美夜景")
        .map("Grand+Front+Osaka+South+Building"),
    seed("d4-8", "19:30", "🏯 回 難波", "晚餐、超市、唐吉訶德").map("Namba+Station"),
];

const DAY5: &[Seed] = &[
    seed("d5-1", "08:00", "🍳 起床吃早餐", "超商 or 麥當勞").map("McDonalds"),
    seed("d5-2", "09:00", "🏯 大阪城公園", "搭電車到 大阪商務園區站").map("Osaka+Castle+Park"),
    seed("d5-3", "11:00", "🍣 黑門市場 午餐", "狂吃和牛、生魚片、烤扇貝")
        .highlight()
        .map("Kuromon+Ichiba+Market"),
    seed("d5-4", "14:00", "🛍️ 最後補貨", "難波周邊做最後採買").map("Namba+Parks"),
    seed("d5-5", "15:00", "🚆 前往機場", "南海 Rapi:t 特急 → 關西機場").map("Nankai+Namba+Station"),
    seed("d5-6", "18:55", "🛫 起飛回台灣 (IT213)", "滿載而歸！"),
];

/// The hard-coded itinerary every session starts from and `reset` returns to.
pub fn default_schedule() -> ScheduleCollection {
    [
        ("day1", DAY1),
        ("day2", DAY2),
        ("day3", DAY3),
        ("day4", DAY4),
        ("day5", DAY5),
    ]
    .into_iter()
    .map(|(day, seeds)| {
        let entries = seeds.iter().map(|s| s.to_entry()).collect();
        (day.to_string(), entries)
    })
    .collect()
}
