//! Static commentary shown next to each view.
//!
//! The insight texts are in Indonesian; the dataset description is English.

pub const DATASET_INFORMATION: &str = "\
Bike sharing systems are a new generation of traditional bike rentals where the entire process of membership, rental, and return has become automatic. Through these systems, users can easily rent a bike from one station and return it to another. Currently, there are over 500 bike-sharing programs worldwide, consisting of more than 500,000 bicycles. These systems are gaining attention due to their significant role in traffic management, environmental preservation, and health improvement.

The characteristics of the data generated by these systems make them particularly attractive for research. Unlike other forms of public transport such as buses or subways, bike sharing systems record explicit data on the duration of trips, departure, and arrival locations. This data can serve as a 'virtual sensor network' for monitoring city mobility patterns. Therefore, monitoring bike-sharing data has the potential to detect significant events and trends in the city.";

pub const COLUMN_DESCRIPTIONS: &str = "\
- instant: Record index
- dteday: Date
- season: Season (1: winter, 2: spring, 3: summer, 4: fall)
- yr: Year (0: 2011, 1: 2012)
- mnth: Month (1 to 12)
- hr: Hour of the day (0 to 23)
- holiday: Whether the day is a holiday (1: holiday, 0: not a holiday)
- weekday: Day of the week (0: Sunday, 1: Monday, ..., 6: Saturday)
- workingday: Whether the day is a working day (1: working day, 0: weekend/holiday)
- weathersit: Weather condition:
    1: Clear, Few clouds, Partly cloudy
    2: Mist + Cloudy, Mist + Broken clouds
    3: Light Snow, Light Rain + Thunderstorm
    4: Heavy Rain + Ice Pallets, Snow + Fog
- temp: Normalized temperature in Celsius (scaled between -8°C and 39°C)
- atemp: Normalized apparent (feels-like) temperature (scaled between -16°C and 50°C)
- hum: Normalized humidity (divided by 100)
- windspeed: Normalized wind speed (divided by 67)
- casual: Count of casual users (non-registered)
- registered: Count of registered users
- cnt: Total count of rentals (casual + registered)";

pub const MONTHLY_INSIGHT: &str = "\
- Pola total rental untuk setiap tahunnya cenderung sama, yaitu naik saat awal tahun dan turun saat akhir tahun.
- Pada tahun 2011 kenaikan total rental yang signifikan terjadi di bulan Maret hingga Mei, lalu setelah itu mulai turun perlahan menuju akhir tahun.
- Pada tahun 2012 kenaikan total rental yang signifikan terjadi di bulan Februari hingga Mei, lalu stabil di bulan Mei hingga September, kemudian turun secara drastis menuju akhir tahun.
- Total rental terbanyak terjadi di bulan September tahun 2012.
- Pola total rental, casual rental, dan registered rental cenderung sama.";

pub const SEASONAL_INSIGHT: &str = "\
- Musim mempengaruhi total rental.
- Total rental terbanyak terjadi di musim panas (summer).
- Total rental tersedikit terjadi di musim dingin (winter).";

pub const WEATHER_INSIGHT: &str = "\
- Cuaca mempengaruhi total rental.
- Sebagian besar orang memilih rental sepeda pada cuaca cerah (clear/partly cloudy) dan berawan (mist/cloudy).
- Ada sedikit orang yang merental sepeda pada cuaca hujan ringan (light rain/snow).
- Tidak ada orang yang merental sepeda pada cuaca hujan lebat (heavy rain/fog).";

pub const WEEKLY_INSIGHT: &str = "\
- Hari tidak terlalu mempengaruhi jumlah rental.";

pub const DAY_TYPE_INSIGHT: &str = "\
- Sebagian besar orang (69.6%) merental sepeda di hari kerja.
- 28% orang merental sepeda saat bukan hari kerja, tetapi bukan hari libur.
- 2.4% orang merental sepeda saat hari libur.";

pub const WEATHER_INFLUENCE_INSIGHT: &str = "\
- Terdapat korelasi positif yang kecil antara total rental dengan temperature.
- Terdapat korelasi positif yang kecil antara total rental dengan apparent temperature
- Total rental tidak dipengaruhi oleh kelembapan (humidity).
- Total rental tidak dipengaruhi oleh kecepatan angin (wind speed).";

pub const HOURLY_WORKING_INSIGHT: &str = "\
- Pada hari kerja, orang cenderung merental sepeda pada pagi hari dan sore hari.
- Pada pagi hari, orang mulai merental dari jam 5:00 hingga puncaknya di jam 8:00.
- Pada sore hari, orang mulai merental dari jam 15:00 hingga puncaknya di jam 17:00.";

pub const HOURLY_NON_WORKING_INSIGHT: &str = "\
- Di hari bukan hari kerja, orang mulai merental dari pagi jam 6:00 hingga puncaknya di jam 12:00 sampai 16:00, lalu turun setelah itu.";

pub const HOURLY_SEASON_INSIGHT: &str = "\
- Pola total rental tiap jam untuk semua musim cenderung sama.
- Sama seperti visualisasi total rental setiap musim, untuk total rental paling banyak terjadi di musim panas (summer) dan paling sedikit terjadi di musim dingin (winter).";
